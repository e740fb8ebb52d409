//! CLI Configuration

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

pub const KEYS: &[&str] = &["default_format", "deny_advisories", "backend_url"];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    pub default_format: Option<OutputFormat>,
    pub deny_advisories: Option<bool>,
    pub backend_url: Option<String>,
}

impl CliConfig {
    pub fn load(profile: Option<&str>) -> Result<Self> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf> {
        let path = Self::config_path(profile)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// Current value of `key`, `None` when unset
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "default_format" => self.default_format.map(|f| f.to_string()),
            "deny_advisories" => self.deny_advisories.map(|d| d.to_string()),
            "backend_url" => self.backend_url.clone(),
            _ => bail!("Unknown config key: {key} (expected one of {})", KEYS.join(", ")),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_format" => {
                let format = OutputFormat::from_str(value, true)
                    .map_err(|e| anyhow!("invalid format `{value}`: {e}"))?;
                self.default_format = Some(format);
            }
            "deny_advisories" => {
                let deny = value
                    .parse::<bool>()
                    .with_context(|| format!("invalid boolean `{value}`"))?;
                self.deny_advisories = Some(deny);
            }
            "backend_url" => self.backend_url = Some(value.to_string()),
            _ => bail!("Unknown config key: {key} (expected one of {})", KEYS.join(", ")),
        }
        Ok(())
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot find home directory"))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".formcheck").join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_known_keys() {
        let mut config = CliConfig::default();
        config.set("default_format", "JSON").expect("format");
        config.set("deny_advisories", "true").expect("bool");
        config.set("backend_url", "http://localhost:5000/submit").expect("url");

        assert_eq!(config.get("default_format").expect("key"), Some("json".into()));
        assert_eq!(config.get("deny_advisories").expect("key"), Some("true".into()));
        assert_eq!(
            config.get("backend_url").expect("key"),
            Some("http://localhost:5000/submit".into())
        );
    }

    #[test]
    fn test_rejects_bad_values_and_keys() {
        let mut config = CliConfig::default();
        assert!(config.set("default_format", "xml").is_err());
        assert!(config.set("deny_advisories", "maybe").is_err());
        assert!(config.set("api_key", "secret").is_err());
        assert!(config.get("api_key").is_err());
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CliConfig {
            default_format: Some(OutputFormat::Yaml),
            deny_advisories: Some(false),
            backend_url: None,
        };
        let text = toml::to_string_pretty(&config).expect("serialize");
        assert!(text.contains("default_format = \"yaml\""));
        let parsed: CliConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }
}
