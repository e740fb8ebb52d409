//! formcheck
//!
//! Command-line checker for contact-form `config.json` files.
//!
//! # Usage
//!
//! ```bash
//! formcheck validate config.json
//! formcheck validate --deny-advisories site-a/config.json site-b/config.json
//! formcheck normalize config.json --format yaml
//! formcheck fixtures list
//! formcheck fixtures show all-inputs --backend-url http://localhost:5000/submit
//! formcheck config set default_format json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "formcheck")]
#[command(version)]
#[command(about = "Validate contact-form config.json files", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, short, global = true, env = "FORMCHECK_FORMAT")]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, global = true, env = "FORMCHECK_PROFILE")]
    profile: Option<String>,

    /// Log validation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more config files
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Treat advisories as failures
        #[arg(long, env = "FORMCHECK_DENY_ADVISORIES")]
        deny_advisories: bool,
    },
    /// Print a config in its validated, normalized form
    Normalize { file: PathBuf },
    /// Inspect built-in config fixtures
    Fixtures {
        #[command(subcommand)]
        action: FixtureCommands,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum FixtureCommands {
    /// List fixture names
    List,
    /// Print one fixture config
    Show {
        name: String,
        /// Backend URL written into the fixture
        #[arg(long, env = "FORMCHECK_BACKEND_URL")]
        backend_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let profile = cli.profile.as_deref();
    let settings = config::CliConfig::load(profile).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable CLI config: {e:#}");
        config::CliConfig::default()
    });
    let format = cli
        .format
        .or(settings.default_format)
        .unwrap_or(output::OutputFormat::Table);

    let result = match cli.command {
        Commands::Validate {
            files,
            deny_advisories,
        } => {
            let deny = deny_advisories || settings.deny_advisories.unwrap_or(false);
            commands::validate::handle(&files, deny, format)
        }
        Commands::Normalize { file } => commands::normalize::handle(&file, format),
        Commands::Fixtures { action } => commands::fixtures::handle(action, &settings, format),
        Commands::Config { action } => commands::config::handle(action, profile),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
