//! Canonical `config.json` fixtures
//!
//! Each fixture exercises one rendering scenario and is guaranteed to pass
//! validation. Builders return raw JSON so callers can tweak them before
//! validating or writing them out.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::question::KNOWN_INPUT_TYPES;

/// Backend the local mock server listens on
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/submit";

/// Named config scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixture {
    AllInputs,
    MultipleSelectOptions,
    IgnoreUpload,
    Instructions,
    MultilineQuestionLabel,
    DisabledFormDownload,
    MissingEmail,
    CustomButtons,
    CustomMissingField,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown fixture `{0}`")]
pub struct UnknownFixture(pub String);

impl Fixture {
    pub const ALL: [Fixture; 9] = [
        Fixture::AllInputs,
        Fixture::MultipleSelectOptions,
        Fixture::IgnoreUpload,
        Fixture::Instructions,
        Fixture::MultilineQuestionLabel,
        Fixture::DisabledFormDownload,
        Fixture::MissingEmail,
        Fixture::CustomButtons,
        Fixture::CustomMissingField,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::AllInputs => "all-inputs",
            Self::MultipleSelectOptions => "multiple-select-options",
            Self::IgnoreUpload => "ignore-upload",
            Self::Instructions => "instructions",
            Self::MultilineQuestionLabel => "multiline-question-label",
            Self::DisabledFormDownload => "disabled-form-download",
            Self::MissingEmail => "missing-email",
            Self::CustomButtons => "custom-buttons",
            Self::CustomMissingField => "custom-missing-field",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AllInputs => "one required question per supported input type",
            Self::MultipleSelectOptions => "multi-select selectbox with a disabled placeholder",
            Self::IgnoreUpload => "file question with uploads ignored",
            Self::Instructions => "multi-line HTML instructions",
            Self::MultilineQuestionLabel => "multi-line HTML question label",
            Self::DisabledFormDownload => "form download button disabled",
            Self::MissingEmail => "backend url as the only submission target",
            Self::CustomButtons => "custom send/download button text",
            Self::CustomMissingField => "custom missing-field alert text",
        }
    }

    /// Build this fixture against `backend_url`
    pub fn build(self, backend_url: &str) -> Value {
        let mut config = base_config(backend_url);
        match self {
            Self::AllInputs => {
                config["questions"] = all_input_questions();
            }
            Self::MultipleSelectOptions => {
                config["questions"] = json!([{
                    "label": "Select your country",
                    "name": "country",
                    "type": "selectbox",
                    "required": true,
                    "options": [
                        {"label": "--Select all that apply--", "value": "", "selected": true, "disabled": true},
                        {"label": "USA", "value": "USA"},
                        {"label": "Canada", "value": "CAN"},
                        {"label": "United Kingdom", "value": "UK"},
                        {"label": "Australia", "value": "AUS"},
                    ],
                    "custom": {"multiple": true},
                }]);
            }
            Self::IgnoreUpload => {
                config["ignore_file_upload"] = json!(true);
                config["questions"] = json!([{
                    "label": "Upload funny memes",
                    "name": "meme_imgs",
                    "type": "file",
                    "required": true,
                    "custom": {"multiple": true, "accept": "*"},
                }]);
            }
            Self::Instructions => {
                config["instructions"] = json!([
                    "<p>",
                    "Fill out the form below, and click <b>Send</b> to submit it.",
                    "If that should fail, simply click <b>Download Form</b> and manually",
                    "email the completed form to:",
                    "<strong class='email-placeholder'>[Email Address]</strong>.",
                    "</p>",
                ]);
                config["questions"] = single_text_question();
            }
            Self::MultilineQuestionLabel => {
                let mdn_ref = "https://developer.mozilla.org/en-US/docs/Web/HTML";
                config["questions"] = json!([{
                    "label": [
                        "This is a multiline label. It is intended to make it easier to write",
                        "multiline questions and include <i>interesting</i>",
                        format!("<a id='mdn_html_docs' href='{mdn_ref}'>HTML syntax</a>"),
                        "directly in your <i>question text</i>",
                    ],
                    "name": "multiline_html_question",
                    "type": "text",
                    "required": true,
                }]);
            }
            Self::DisabledFormDownload => {
                config["enable_form_download"] = json!(false);
                config["questions"] = single_text_question();
            }
            Self::MissingEmail => {
                if let Some(map) = config.as_object_mut() {
                    map.remove("email");
                }
                config["questions"] = single_text_question();
            }
            Self::CustomButtons => {
                config["send_button_text"] = json!("Custom Send Text");
                config["download_button_text"] = json!("Custom Download Text");
                config["questions"] = single_text_question();
            }
            Self::CustomMissingField => {
                config["missing_field_message"] = json!("Custom Missing Field Alert");
                config["questions"] = single_text_question();
            }
        }
        config
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Fixture {
    type Err = UnknownFixture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|fixture| fixture.name() == wanted)
            .ok_or_else(|| UnknownFixture(s.to_string()))
    }
}

/// Smallest config every fixture starts from; has no questions
pub fn base_config(backend_url: &str) -> Value {
    json!({
        "subject": "Testing",
        "title": "Testing",
        "enable_form_download": true,
        "form_backend_url": backend_url,
        "ignore_file_upload": false,
        "email": "foo@bar.com",
        "questions": [],
    })
}

/// Adjust a user config so it can be driven against a local backend.
///
/// File inputs accept anything and text inputs lose their length limits so
/// automated input never trips browser-side constraints.
pub fn prepare_for_testing(mut config: Value, backend_url: &str) -> Value {
    config["form_backend_url"] = json!(backend_url);
    config["ignore_file_upload"] = json!(false);

    let questions = config
        .get_mut("questions")
        .and_then(Value::as_array_mut)
        .map(|questions| questions.iter_mut().filter_map(Value::as_object_mut));
    for question in questions.into_iter().flatten() {
        let input_type = question
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default();
        match input_type.as_str() {
            "file" => {
                let custom = question
                    .entry("custom")
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Some(custom) = custom.as_object_mut() {
                    custom.insert("accept".into(), json!("*"));
                }
            }
            "text" | "textarea" => {
                if let Some(custom) = question.get_mut("custom").and_then(Value::as_object_mut) {
                    custom.remove("minlength");
                    custom.remove("maxlength");
                }
            }
            _ => {}
        }
    }
    config
}

fn single_text_question() -> Value {
    json!([{"label": "Question 1", "name": "q1", "type": "text", "required": true}])
}

fn all_input_questions() -> Value {
    let questions = KNOWN_INPUT_TYPES
        .iter()
        .enumerate()
        .map(|(idx, input_type)| {
            let mut question = json!({
                "label": format!("Question{}", idx + 1),
                "name": format!("testing_{input_type}_input_type"),
                "type": input_type,
                "required": true,
            });
            if *input_type == crate::question::SELECTBOX {
                question["options"] = json!([
                    {"label": "--Select option--", "value": "", "selected": true, "disabled": true},
                    {"label": "Option1", "value": "Opt1"},
                    {"label": "Option2", "value": "Opt2"},
                    {"label": "Option3", "value": "Opt3"},
                    {"label": "Option4", "value": "Opt4"},
                ]);
            }
            question
        })
        .collect();
    Value::Array(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{check_config_schema, Config};

    #[test]
    fn test_every_fixture_passes_schema() {
        for fixture in Fixture::ALL {
            let raw = fixture.build(DEFAULT_BACKEND_URL);
            assert_eq!(check_config_schema(&raw), Ok(true), "fixture {fixture}");
        }
    }

    #[test]
    fn test_fixtures_have_no_advisories() {
        for fixture in Fixture::ALL {
            let validated = Config::from_value(&fixture.build(DEFAULT_BACKEND_URL)).expect("valid");
            assert!(validated.advisories.is_empty(), "fixture {fixture}");
        }
    }

    #[test]
    fn test_fixture_names_parse_back() {
        for fixture in Fixture::ALL {
            assert_eq!(fixture.name().parse::<Fixture>(), Ok(fixture));
        }
        assert_eq!("ALL_INPUTS".parse::<Fixture>(), Ok(Fixture::AllInputs));
        assert_eq!(
            "nope".parse::<Fixture>(),
            Err(UnknownFixture("nope".to_string()))
        );
    }

    #[test]
    fn test_all_inputs_covers_every_known_type() {
        let config = Config::from_value(&Fixture::AllInputs.build(DEFAULT_BACKEND_URL))
            .expect("valid")
            .into_inner();
        let types: Vec<&str> = config.questions().iter().map(|q| q.input_type()).collect();
        assert_eq!(types, KNOWN_INPUT_TYPES);
        let selectbox = config
            .question("testing_selectbox_input_type")
            .expect("selectbox question");
        assert_eq!(selectbox.select_options().len(), 5);
        assert!(selectbox.select_options()[0].is_disabled());
    }

    #[test]
    fn test_default_configs_do_not_ignore_uploads() {
        let config = Fixture::AllInputs.build(DEFAULT_BACKEND_URL);
        assert_eq!(config["ignore_file_upload"], json!(false));
        let config = Fixture::IgnoreUpload.build(DEFAULT_BACKEND_URL);
        assert_eq!(config["ignore_file_upload"], json!(true));
        assert_eq!(config["questions"][0]["custom"]["accept"], "*");
    }

    #[test]
    fn test_multiline_fixtures_collapse() {
        let config = Config::from_value(&Fixture::Instructions.build(DEFAULT_BACKEND_URL))
            .expect("valid")
            .into_inner();
        let instructions = config.instructions().expect("instructions");
        assert!(instructions.starts_with("<p> Fill out the form below"));
        assert!(instructions.contains("email-placeholder"));

        let config = Config::from_value(&Fixture::MultilineQuestionLabel.build(DEFAULT_BACKEND_URL))
            .expect("valid")
            .into_inner();
        let label = config.questions()[0].label();
        assert!(label.contains("id='mdn_html_docs'"));
        assert!(!label.contains('\n'));
    }

    #[test]
    fn test_missing_email_still_has_backend_target() {
        let raw = Fixture::MissingEmail.build("http://localhost:6123/submit");
        assert!(raw.get("email").is_none());
        let config = Config::from_value(&raw).expect("valid").into_inner();
        assert_eq!(config.form_backend_url(), Some("http://localhost:6123/submit"));
    }

    #[test]
    fn test_prepare_for_testing() {
        let user_config = json!({
            "title": "Contact",
            "subject": "Hello",
            "email": "me@example.com",
            "ignore_file_upload": true,
            "questions": [
                {"label": "Name", "name": "name", "type": "text", "required": true,
                 "custom": {"minlength": 3, "maxlength": 20, "placeholder": "You"}},
                {"label": "Files", "name": "files", "type": "file", "required": false},
                {"label": "Photo", "name": "photo", "type": "file", "required": false,
                 "custom": {"accept": "image/*", "multiple": true}},
            ],
        });
        let prepared = prepare_for_testing(user_config, DEFAULT_BACKEND_URL);

        assert_eq!(prepared["form_backend_url"], DEFAULT_BACKEND_URL);
        assert_eq!(prepared["ignore_file_upload"], json!(false));
        assert_eq!(
            prepared["questions"][0]["custom"],
            json!({"placeholder": "You"})
        );
        assert_eq!(prepared["questions"][1]["custom"], json!({"accept": "*"}));
        assert_eq!(
            prepared["questions"][2]["custom"],
            json!({"accept": "*", "multiple": true})
        );
        assert_eq!(check_config_schema(&prepared), Ok(true));
    }
}
