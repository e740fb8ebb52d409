//! Top-level `config.json` validation

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::advisory::{Advisory, Validated};
use crate::error::{DomainRuleViolation, Entity, Result, SchemaError};
use crate::fields::{check_record, index_path, join_lines, FieldKind, FieldSpec, Record};
use crate::question::Question;

const CONFIG_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", FieldKind::String),
    FieldSpec::required("subject", FieldKind::String),
    FieldSpec::required("questions", FieldKind::Array),
    FieldSpec::optional("email", FieldKind::String),
    FieldSpec::optional("enable_form_download", FieldKind::Bool),
    FieldSpec::optional("form_backend_url", FieldKind::String),
    FieldSpec::optional("ignore_file_upload", FieldKind::Bool),
    FieldSpec::optional("instructions", FieldKind::StringOrArray),
    FieldSpec::optional("send_button_text", FieldKind::String),
    FieldSpec::optional("download_button_text", FieldKind::String),
    FieldSpec::optional("missing_field_message", FieldKind::String),
];

/// Validated form description
///
/// # Invariants
/// - Question names are unique
/// - At least one of `email` / `form_backend_url` is non-empty
/// - `instructions` and every question label are single strings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    title: String,
    subject: String,
    questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_form_download: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    form_backend_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignore_file_upload: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    send_button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_field_message: Option<String>,
}

impl Config {
    /// Validate a raw config object.
    ///
    /// Questions are validated in order and the first invalid one aborts;
    /// duplicate names are only checked once every question is valid and
    /// are reported together.
    pub fn from_value(raw: &Value) -> Result<Validated<Self>> {
        let record = check_record(Entity::Config, "", raw, CONFIG_FIELDS)?;

        let (questions, advisories) = validate_questions(&record)?;

        let duplicates = find_duplicate_names(&questions);
        if !duplicates.is_empty() {
            return Err(DomainRuleViolation::DuplicateQuestionNames { names: duplicates }.into());
        }

        let instructions = record
            .get("instructions")
            .map(|value| join_lines(Entity::Config, "instructions", value))
            .transpose()?;

        let email = record.opt_string("email")?;
        let form_backend_url = record.opt_string("form_backend_url")?;
        let has_target = [&email, &form_backend_url]
            .iter()
            .any(|target| target.as_deref().is_some_and(|t| !t.is_empty()));
        if !has_target {
            return Err(DomainRuleViolation::NoSubmissionTarget.into());
        }

        let config = Self {
            title: record.string("title")?,
            subject: record.string("subject")?,
            questions,
            email,
            enable_form_download: record.opt_bool("enable_form_download")?,
            form_backend_url,
            ignore_file_upload: record.opt_bool("ignore_file_upload")?,
            instructions,
            send_button_text: record.opt_string("send_button_text")?,
            download_button_text: record.opt_string("download_button_text")?,
            missing_field_message: record.opt_string("missing_field_message")?,
        };

        debug!(
            title = %config.title,
            questions = config.questions.len(),
            advisories = advisories.len(),
            "config validated"
        );

        Ok(Validated::new(config, advisories))
    }

    /// Parse JSON text, then validate it
    pub fn from_json_str(raw: &str) -> Result<Validated<Self>> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(&value)
    }

    /// Raw JSON form of this config; validates back to an equal config
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by its `name`
    pub fn question(&self, name: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.name() == name)
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn form_backend_url(&self) -> Option<&str> {
        self.form_backend_url.as_deref()
    }

    pub fn enable_form_download(&self) -> Option<bool> {
        self.enable_form_download
    }

    pub fn ignore_file_upload(&self) -> Option<bool> {
        self.ignore_file_upload
    }

    /// Instructions, with multi-line instructions already joined
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    pub fn send_button_text(&self) -> Option<&str> {
        self.send_button_text.as_deref()
    }

    pub fn download_button_text(&self) -> Option<&str> {
        self.download_button_text.as_deref()
    }

    pub fn missing_field_message(&self) -> Option<&str> {
        self.missing_field_message.as_deref()
    }

    /// Configured, non-empty submission targets: email first, then backend url
    pub fn submission_targets(&self) -> impl Iterator<Item = &str> {
        [self.email(), self.form_backend_url()]
            .into_iter()
            .flatten()
            .filter(|target| !target.is_empty())
    }
}

fn validate_questions(record: &Record<'_>) -> Result<(Vec<Question>, Vec<Advisory>)> {
    let raw_questions = record.array("questions")?;
    let mut questions = Vec::with_capacity(raw_questions.len());
    let mut advisories = Vec::new();

    for (index, raw) in raw_questions.iter().enumerate() {
        let validated = Question::validate_at(&index_path("questions", index), raw)?;
        advisories.extend(validated.advisories);
        questions.push(validated.value);
    }

    Ok((questions, advisories))
}

/// Names used by more than one question
pub fn find_duplicate_names(questions: &[Question]) -> BTreeSet<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for question in questions {
        *counts.entry(question.name()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Read and validate a `config.json` file
pub fn load_config(path: impl AsRef<Path>) -> Result<Validated<Config>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading config");

    let raw = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let validated = Config::from_json_str(&raw)?;

    info!(
        path = %path.display(),
        questions = validated.value.questions().len(),
        "config loaded"
    );
    Ok(validated)
}

/// Whether `raw` satisfies the config schema.
///
/// Returns `Ok(true)` on success and a descriptive error otherwise; never
/// `Ok(false)`.
pub fn check_config_schema(raw: &Value) -> Result<bool> {
    Config::from_value(raw).map(|_| true)
}
