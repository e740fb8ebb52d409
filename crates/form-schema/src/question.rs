//! Form questions

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::advisory::{Advisory, Validated};
use crate::error::{DomainRuleViolation, Entity, Result};
use crate::fields::{check_record, index_path, join_lines, FieldKind, FieldSpec};
use crate::option::SelectOption;

/// The one input type whose `options` are validated and rendered
pub const SELECTBOX: &str = "selectbox";

/// Input types the form renderer knows how to draw
pub const KNOWN_INPUT_TYPES: &[&str] = &[
    "date",
    "datetime-local",
    "email",
    "file",
    "number",
    "selectbox",
    "tel",
    "text",
    "textarea",
    "time",
    "url",
];

const QUESTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("label", FieldKind::StringOrArray),
    FieldSpec::required("name", FieldKind::String),
    FieldSpec::required("type", FieldKind::String),
    FieldSpec::required("required", FieldKind::Bool),
    FieldSpec::optional("options", FieldKind::Array),
    FieldSpec::optional("custom", FieldKind::Object),
];

/// Options attached to a question
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuestionOptions {
    /// Selectbox options, validated and in input order
    Validated(Vec<SelectOption>),
    /// Options on any other type, kept as written and ignored by the renderer
    Ignored(Vec<Value>),
}

impl QuestionOptions {
    pub fn len(&self) -> usize {
        match self {
            Self::Validated(options) => options.len(),
            Self::Ignored(raw) => raw.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_validated(&self) -> Option<&[SelectOption]> {
        match self {
            Self::Validated(options) => Some(options),
            Self::Ignored(_) => None,
        }
    }
}

/// One form field's declarative description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    label: String,
    name: String,
    #[serde(rename = "type")]
    input_type: String,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<QuestionOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom: Option<Map<String, Value>>,
}

impl Question {
    /// Validate a raw question record
    pub fn from_value(raw: &Value) -> Result<Validated<Self>> {
        Self::validate_at("", raw)
    }

    pub(crate) fn validate_at(path: &str, raw: &Value) -> Result<Validated<Self>> {
        let record = check_record(Entity::Question, path, raw, QUESTION_FIELDS)?;
        let name = record.string("name")?;
        let input_type = record.string("type")?;
        let required = record.bool("required")?;
        let mut advisories = Vec::new();

        let options = match (input_type == SELECTBOX, record.opt_array("options")?) {
            (true, Some(raw_options)) if !raw_options.is_empty() => {
                let options_path = record.path_of("options");
                let options = raw_options
                    .iter()
                    .enumerate()
                    .map(|(index, option)| {
                        SelectOption::validate_at(&index_path(&options_path, index), option)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Some(QuestionOptions::Validated(options))
            }
            (true, _) => {
                return Err(DomainRuleViolation::SelectboxWithoutOptions {
                    question: name,
                    field: record.path_of("options"),
                }
                .into())
            }
            (false, Some(raw_options)) => {
                advisories.push(Advisory::options_ignored(&name, &input_type));
                Some(QuestionOptions::Ignored(raw_options.clone()))
            }
            (false, None) => None,
        };

        if !KNOWN_INPUT_TYPES.contains(&input_type.as_str()) {
            debug!(question = %name, input_type = %input_type, "input type passed through to renderer");
        }

        let label = join_lines(Entity::Question, &record.path_of("label"), record.value("label")?)?;
        let custom = record.opt_object("custom")?.cloned();

        debug!(question = %name, input_type = %input_type, "question validated");

        Ok(Validated::new(
            Self {
                label,
                name,
                input_type,
                required,
                options,
                custom,
            },
            advisories,
        ))
    }

    /// Label text, with multi-line labels already joined
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_type(&self) -> &str {
        &self.input_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_selectbox(&self) -> bool {
        self.input_type == SELECTBOX
    }

    pub fn options(&self) -> Option<&QuestionOptions> {
        self.options.as_ref()
    }

    /// Validated selectbox options; empty for every other type
    pub fn select_options(&self) -> &[SelectOption] {
        self.options
            .as_ref()
            .and_then(QuestionOptions::as_validated)
            .unwrap_or_default()
    }

    /// Attributes forwarded untouched to the rendered input element
    pub fn custom(&self) -> Option<&Map<String, Value>> {
        self.custom.as_ref()
    }
}
