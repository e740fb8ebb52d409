//! Validate commands

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use colored::Colorize;
use form_schema::load_config;
use serde::Serialize;
use tabled::Tabled;

use crate::output::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Valid,
    Advisories,
    Invalid,
}

#[derive(Debug, Serialize, Tabled)]
pub struct FileReport {
    pub file: String,
    #[tabled(display_with = "display_status")]
    pub status: Status,
    pub questions: usize,
    #[tabled(display_with = "display_details")]
    pub details: Vec<String>,
}

fn display_status(status: &Status) -> String {
    match status {
        Status::Valid => "valid".green().to_string(),
        Status::Advisories => "advisories".yellow().to_string(),
        Status::Invalid => "invalid".red().bold().to_string(),
    }
}

fn display_details(details: &[String]) -> String {
    details.join("\n")
}

pub fn handle(files: &[PathBuf], deny_advisories: bool, format: OutputFormat) -> Result<()> {
    let reports: Vec<FileReport> = files
        .iter()
        .map(|file| check_file(file, deny_advisories))
        .collect();
    format.print_rows(&reports)?;

    let failed = reports.iter().filter(|r| r.status == Status::Invalid).count();
    if failed > 0 {
        bail!("{failed} of {} config file(s) failed validation", reports.len());
    }
    Ok(())
}

pub fn check_file(path: &Path, deny_advisories: bool) -> FileReport {
    let file = path.display().to_string();
    match load_config(path) {
        Ok(validated) => {
            let status = match (validated.has_advisories(), deny_advisories) {
                (false, _) => Status::Valid,
                (true, false) => Status::Advisories,
                (true, true) => Status::Invalid,
            };
            FileReport {
                file,
                status,
                questions: validated.value.questions().len(),
                details: validated.advisories.iter().map(ToString::to_string).collect(),
            }
        }
        Err(e) => FileReport {
            file,
            status: Status::Invalid,
            questions: 0,
            details: vec![e.to_string()],
        },
    }
}
