//! Selectbox options

use serde::Serialize;
use serde_json::Value;

use crate::error::{Entity, Result};
use crate::fields::{check_record, FieldKind, FieldSpec};

const SELECT_OPTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("label", FieldKind::String),
    FieldSpec::required("value", FieldKind::String),
    FieldSpec::optional("selected", FieldKind::Bool),
    FieldSpec::optional("disabled", FieldKind::Bool),
];

/// One choice within a selectbox question
///
/// # Invariants
/// - `label` and `value` are always present
/// - No keys beyond the four declared ones were accepted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectOption {
    label: String,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disabled: Option<bool>,
}

impl SelectOption {
    /// Validate a raw option record
    pub fn from_value(raw: &Value) -> Result<Self> {
        Self::validate_at("", raw)
    }

    pub(crate) fn validate_at(path: &str, raw: &Value) -> Result<Self> {
        let record = check_record(Entity::SelectOption, path, raw, SELECT_OPTION_FIELDS)?;
        Ok(Self {
            label: record.string("label")?,
            value: record.string("value")?,
            selected: record.opt_bool("selected")?,
            disabled: record.opt_bool("disabled")?,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// `selected` as written, `None` when absent
    pub fn selected(&self) -> Option<bool> {
        self.selected
    }

    /// `disabled` as written, `None` when absent
    pub fn disabled(&self) -> Option<bool> {
        self.disabled
    }

    pub fn is_selected(&self) -> bool {
        self.selected.unwrap_or(false)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SchemaError};
    use crate::fields::JsonKind;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_valid_option() {
        let option = SelectOption::from_value(&json!({
            "label": "Option 1",
            "value": "option1",
            "selected": true,
            "disabled": false,
        }))
        .expect("valid option");
        assert_eq!(option.label(), "Option 1");
        assert_eq!(option.value(), "option1");
        assert_eq!(option.selected(), Some(true));
        assert_eq!(option.disabled(), Some(false));
    }

    #[test]
    fn test_valid_option_with_defaults() {
        let option =
            SelectOption::from_value(&json!({"label": "Option 2", "value": "option2"})).expect("valid");
        assert_eq!(option.selected(), None);
        assert!(!option.is_selected());
        assert!(!option.is_disabled());
    }

    #[test]
    fn test_wrong_field_types() {
        let err = SelectOption::from_value(&json!({
            "label": "Option 3", "value": "option3", "selected": "true"
        }))
        .expect_err("string selected");
        assert_eq!(
            err,
            SchemaError::TypeMismatch {
                entity: Entity::SelectOption,
                field: "selected".into(),
                expected: FieldKind::Bool,
                actual: JsonKind::String,
            }
        );

        let err = SelectOption::from_value(&json!({
            "label": "Option 4", "value": "option4", "disabled": "false"
        }))
        .expect_err("string disabled");
        assert_eq!(err.field(), Some("disabled"));
    }

    #[test]
    fn test_missing_required_keys() {
        let err = SelectOption::from_value(&json!({"label": "Option 5"})).expect_err("no value");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(err.field(), Some("value"));

        let err = SelectOption::from_value(&json!({"value": "option6"})).expect_err("no label");
        assert_eq!(err.field(), Some("label"));
    }

    #[test]
    fn test_wrong_key_names() {
        let err = SelectOption::from_value(&json!({"label": "Option 7", "val": "option7"}))
            .expect_err("val");
        assert_eq!(err.kind(), ErrorKind::UnrecognizedField);

        let err = SelectOption::from_value(&json!({
            "label": "Option 8", "value": "option8", "selected": true, "disbled": false
        }))
        .expect_err("typo");
        assert_eq!(
            err,
            SchemaError::UnrecognizedField {
                entity: Entity::SelectOption,
                field: "disbled".into(),
                suggestion: Some("disabled".into()),
            }
        );
    }

    #[test]
    fn test_error_path_is_nested_under_question() {
        let err = SelectOption::validate_at("questions[0].options[2]", &json!({"label": "x"}))
            .expect_err("no value");
        assert_eq!(err.field(), Some("questions[0].options[2].value"));
    }

    proptest! {
        #[test]
        fn prop_valid_options_round_trip_fields(
            label in ".*",
            value in ".*",
            selected in proptest::option::of(any::<bool>()),
            disabled in proptest::option::of(any::<bool>()),
        ) {
            let mut raw = json!({"label": label.clone(), "value": value.clone()});
            if let Some(s) = selected { raw["selected"] = json!(s); }
            if let Some(d) = disabled { raw["disabled"] = json!(d); }

            let option = SelectOption::from_value(&raw).expect("valid");
            prop_assert_eq!(option.label(), label.as_str());
            prop_assert_eq!(option.value(), value.as_str());
            prop_assert_eq!(option.selected(), selected);
            prop_assert_eq!(option.disabled(), disabled);
        }

        #[test]
        fn prop_non_bool_flags_are_rejected(flag in prop_oneof![Just("selected"), Just("disabled")], text in ".*") {
            let mut raw = json!({"label": "L", "value": "v"});
            raw[flag] = json!(text);
            let err = SelectOption::from_value(&raw).expect_err("mistyped flag");
            prop_assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        }

        #[test]
        fn prop_unknown_keys_are_rejected(key in "[a-z_]{1,12}") {
            prop_assume!(!SELECT_OPTION_FIELDS.iter().any(|spec| spec.name == key));
            let mut raw = json!({"label": "L", "value": "v"});
            raw[key.as_str()] = json!(true);
            let err = SelectOption::from_value(&raw).expect_err("unknown key");
            prop_assert_eq!(err.kind(), ErrorKind::UnrecognizedField);
        }
    }
}
