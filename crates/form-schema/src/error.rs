//! Error types for config schema validation

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::fields::{FieldKind, JsonKind};

/// The record type an error was raised against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// Top-level `config.json` object
    Config,
    /// One entry of `questions`
    Question,
    /// One entry of a selectbox question's `options`
    SelectOption,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Question => write!(f, "question"),
            Self::SelectOption => write!(f, "select option"),
        }
    }
}

/// Broad error category, stable across message changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingRequiredField,
    TypeMismatch,
    UnrecognizedField,
    DomainRuleViolation,
    InvalidJson,
    Io,
}

/// Schema validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A required key is absent
    #[error("{entity} is missing required field `{field}`")]
    MissingRequiredField { entity: Entity, field: String },

    /// A present key holds the wrong kind of value
    #[error("expected `{field}` to be of type {expected}, got {actual}")]
    TypeMismatch {
        entity: Entity,
        field: String,
        expected: FieldKind,
        actual: JsonKind,
    },

    /// A key outside the record's declared shape
    #[error("{entity} has unrecognized field `{field}`{}", did_you_mean(.suggestion))]
    UnrecognizedField {
        entity: Entity,
        field: String,
        suggestion: Option<String>,
    },

    /// Cross-field or semantic rule failure
    #[error(transparent)]
    DomainRule(#[from] DomainRuleViolation),

    /// Raw text could not be parsed as JSON
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },

    /// Config file could not be read
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// Semantic rules checked after the shape is known to be correct
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainRuleViolation {
    #[error("selectbox question `{question}` must have options (`{field}`)")]
    SelectboxWithoutOptions { question: String, field: String },

    #[error("questions must have unique name attrs: {}", join_names(.names))]
    DuplicateQuestionNames { names: BTreeSet<String> },

    #[error("both `email` and `form_backend_url` are unset; at least one submission target is required")]
    NoSubmissionTarget,

    #[error("`{field}` must only contain strings, got {actual}")]
    NonStringElement { field: String, actual: JsonKind },
}

impl SchemaError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::UnrecognizedField { .. } => ErrorKind::UnrecognizedField,
            Self::DomainRule(_) => ErrorKind::DomainRuleViolation,
            Self::InvalidJson { .. } => ErrorKind::InvalidJson,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Field path the error points at, when it points at one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::UnrecognizedField { field, .. } => Some(field),
            Self::DomainRule(
                DomainRuleViolation::NonStringElement { field, .. }
                | DomainRuleViolation::SelectboxWithoutOptions { field, .. },
            ) => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{name}`?)"),
        None => String::new(),
    }
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Result type for schema validation
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_field_message_includes_suggestion() {
        let err = SchemaError::UnrecognizedField {
            entity: Entity::SelectOption,
            field: "disbled".into(),
            suggestion: Some("disabled".into()),
        };
        assert_eq!(
            err.to_string(),
            "select option has unrecognized field `disbled` (did you mean `disabled`?)"
        );
        assert_eq!(err.kind(), ErrorKind::UnrecognizedField);
    }

    #[test]
    fn test_type_mismatch_names_field_and_kinds() {
        let err = SchemaError::TypeMismatch {
            entity: Entity::Config,
            field: "form_backend_url".into(),
            expected: FieldKind::String,
            actual: JsonKind::Number,
        };
        let msg = err.to_string();
        assert!(msg.contains("form_backend_url"));
        assert!(msg.contains("string"));
        assert!(msg.contains("number"));
        assert_eq!(err.field(), Some("form_backend_url"));
    }

    #[test]
    fn test_duplicate_names_are_listed_sorted() {
        let names: BTreeSet<String> = ["q9", "q1"].iter().map(|s| s.to_string()).collect();
        let err: SchemaError = DomainRuleViolation::DuplicateQuestionNames { names }.into();
        assert_eq!(err.to_string(), "questions must have unique name attrs: q1, q9");
        assert_eq!(err.kind(), ErrorKind::DomainRuleViolation);
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_selectbox_without_options_names_path() {
        let err: SchemaError = DomainRuleViolation::SelectboxWithoutOptions {
            question: "country".into(),
            field: "questions[0].options".into(),
        }
        .into();
        assert_eq!(err.field(), Some("questions[0].options"));
        assert_eq!(
            err.to_string(),
            "selectbox question `country` must have options (`questions[0].options`)"
        );
    }

    #[test]
    fn test_invalid_json_keeps_position() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{\n  \"title\": }")
            .expect_err("malformed");
        let err = SchemaError::from(parse_err);
        match err {
            SchemaError::InvalidJson { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
