//! Normalize command

use std::path::Path;

use anyhow::{Context, Result};
use form_schema::load_config;

use crate::output::OutputFormat;

pub fn handle(file: &Path, format: OutputFormat) -> Result<()> {
    let validated =
        load_config(file).with_context(|| format!("validating {}", file.display()))?;
    for advisory in &validated.advisories {
        eprintln!("warning: {advisory}");
    }
    let normalized = validated.value.to_value()?;
    format.print(&normalized)
}
