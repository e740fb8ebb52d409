//! Fixture commands

use anyhow::Result;
use form_schema::{Fixture, DEFAULT_BACKEND_URL};
use serde::Serialize;
use tabled::Tabled;

use crate::config::CliConfig;
use crate::output::OutputFormat;
use crate::FixtureCommands;

#[derive(Debug, Serialize, Tabled)]
pub struct FixtureRow {
    pub name: &'static str,
    pub description: &'static str,
}

pub fn handle(action: FixtureCommands, settings: &CliConfig, format: OutputFormat) -> Result<()> {
    match action {
        FixtureCommands::List => {
            let rows: Vec<FixtureRow> = Fixture::ALL
                .into_iter()
                .map(|fixture| FixtureRow {
                    name: fixture.name(),
                    description: fixture.description(),
                })
                .collect();
            format.print_rows(&rows)?;
        }
        FixtureCommands::Show { name, backend_url } => {
            let fixture: Fixture = name.parse()?;
            let backend_url = backend_url
                .or_else(|| settings.backend_url.clone())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
            format.print(&fixture.build(&backend_url))?;
        }
    }
    Ok(())
}
