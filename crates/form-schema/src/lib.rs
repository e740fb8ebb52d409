//! Contact Form Config Schema
//!
//! Validates the `config.json` that drives the contact-form renderer before
//! the renderer ever sees it.
//!
//! # Architecture
//!
//! ```text
//! raw JSON ──► Config::from_value
//!                 │  shape table (fields::check_record)
//!                 ├─► Question::validate_at   (per question, fail-fast)
//!                 │      └─► SelectOption::validate_at   (selectbox only)
//!                 ├─► duplicate names   (aggregated across all questions)
//!                 ├─► instructions      (lines joined with a space)
//!                 └─► submission target (email or form_backend_url)
//!                           │
//!                           ▼
//!                 Validated<Config> { value, advisories }
//! ```
//!
//! Fatal problems come back as [`SchemaError`]. Non-fatal ones (options on a
//! non-selectbox question, unknown input types) come back as [`Advisory`]
//! values alongside the config and are also logged through `tracing`.
//!
//! # Example
//!
//! ```
//! use form_schema::Config;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "title": "T",
//!     "subject": "S",
//!     "email": "a@b.com",
//!     "questions": [{"label": ["Your", "name"], "name": "q1", "type": "text", "required": true}],
//! });
//! let config = Config::from_value(&raw)?.into_inner();
//! assert_eq!(config.questions()[0].label(), "Your name");
//! # Ok::<(), form_schema::SchemaError>(())
//! ```

pub mod advisory;
pub mod config;
pub mod error;
pub mod fields;
pub mod fixtures;
pub mod option;
pub mod question;

pub use advisory::{Advisory, Validated};
pub use config::{check_config_schema, find_duplicate_names, load_config, Config};
pub use error::{DomainRuleViolation, Entity, ErrorKind, Result, SchemaError};
pub use fields::{FieldKind, JsonKind};
pub use fixtures::{Fixture, DEFAULT_BACKEND_URL};
pub use option::SelectOption;
pub use question::{Question, QuestionOptions, KNOWN_INPUT_TYPES, SELECTBOX};
