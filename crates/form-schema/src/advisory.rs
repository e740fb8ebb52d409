//! Non-fatal diagnostics raised during validation

use std::fmt;

use serde::Serialize;
use tracing::warn;

/// Canonical text for options supplied on a non-selectbox question
pub const OPTIONS_IGNORED_MESSAGE: &str = "Options can only be used by selectbox question type.";

/// A diagnostic that never aborts validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Advisory {
    /// `options` present on a question the renderer will not draw options for
    OptionsIgnored { question: String, input_type: String },
}

impl Advisory {
    pub(crate) fn options_ignored(question: &str, input_type: &str) -> Self {
        Self::OptionsIgnored {
            question: question.to_string(),
            input_type: input_type.to_string(),
        }
        .emit()
    }

    /// Name of the question this advisory refers to
    pub fn question(&self) -> &str {
        match self {
            Self::OptionsIgnored { question, .. } => question,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::OptionsIgnored { .. } => "options_ignored",
        }
    }

    /// Human-readable text without the question prefix
    pub fn message(&self) -> String {
        match self {
            Self::OptionsIgnored { .. } => OPTIONS_IGNORED_MESSAGE.to_string(),
        }
    }

    fn emit(self) -> Self {
        warn!(
            code = self.code(),
            question = self.question(),
            "{}",
            self.message()
        );
        self
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "question `{}`: {}", self.question(), self.message())
    }
}

/// A validated value together with the advisories raised producing it
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    pub value: T,
    pub advisories: Vec<Advisory>,
}

impl<T> Validated<T> {
    pub fn new(value: T, advisories: Vec<Advisory>) -> Self {
        Self { value, advisories }
    }

    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }

    /// Drop the advisories and keep the value
    pub fn into_inner(self) -> T {
        self.value
    }
}
