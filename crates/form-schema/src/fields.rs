//! Field tables and the shared record checker
//!
//! Each record type declares its closed shape as a `&[FieldSpec]` table.
//! `check_record` walks a raw JSON object against that table in a fixed
//! order: unknown keys, then missing required keys, then value kinds.

use std::fmt;

use serde_json::{Map, Value};
use strsim::normalized_levenshtein;

use crate::error::{DomainRuleViolation, Entity, Result, SchemaError};

/// Minimum similarity for an unknown key to get a "did you mean" hint
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Expected kind of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Bool,
    Array,
    Object,
    /// A single string or a list of lines joined with spaces
    StringOrArray,
}

impl FieldKind {
    /// Whether `value` is of this kind
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::StringOrArray => value.is_string() || value.is_array(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "boolean"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
            Self::StringOrArray => write!(f, "string or array of strings"),
        }
    }
}

/// Actual kind of a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "boolean"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// One row of a record's shape table
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

/// `parent.key`, or just `key` at the root
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// A JSON object that passed its shape table
pub(crate) struct Record<'a> {
    entity: Entity,
    path: &'a str,
    map: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    pub fn path_of(&self, name: &str) -> String {
        child_path(self.path, name)
    }

    /// Present, non-null value
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    pub fn value(&self, name: &str) -> Result<&'a Value> {
        self.get(name).ok_or_else(|| self.missing(name))
    }

    pub fn string(&self, name: &str) -> Result<String> {
        self.opt_string(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn opt_string(&self, name: &str) -> Result<Option<String>> {
        self.typed(name, FieldKind::String, |v| v.as_str().map(str::to_string))
    }

    pub fn bool(&self, name: &str) -> Result<bool> {
        self.opt_bool(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn opt_bool(&self, name: &str) -> Result<Option<bool>> {
        self.typed(name, FieldKind::Bool, Value::as_bool)
    }

    pub fn array(&self, name: &str) -> Result<&'a Vec<Value>> {
        self.opt_array(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn opt_array(&self, name: &str) -> Result<Option<&'a Vec<Value>>> {
        self.typed(name, FieldKind::Array, Value::as_array)
    }

    pub fn opt_object(&self, name: &str) -> Result<Option<&'a Map<String, Value>>> {
        self.typed(name, FieldKind::Object, Value::as_object)
    }

    fn typed<T>(
        &self,
        name: &str,
        expected: FieldKind,
        extract: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => extract(value)
                .map(Some)
                .ok_or_else(|| mismatch(self.entity, self.path_of(name), expected, value)),
        }
    }

    fn missing(&self, name: &str) -> SchemaError {
        SchemaError::MissingRequiredField {
            entity: self.entity,
            field: self.path_of(name),
        }
    }
}

/// Check `value` against a closed shape table
pub(crate) fn check_record<'a>(
    entity: Entity,
    path: &'a str,
    value: &'a Value,
    table: &[FieldSpec],
) -> Result<Record<'a>> {
    let map = value.as_object().ok_or_else(|| {
        let field = if path.is_empty() { entity.to_string() } else { path.to_string() };
        mismatch(entity, field, FieldKind::Object, value)
    })?;

    for key in map.keys() {
        if !table.iter().any(|spec| spec.name == key) {
            return Err(SchemaError::UnrecognizedField {
                entity,
                field: child_path(path, key),
                suggestion: suggest(key, table),
            });
        }
    }

    for spec in table.iter().filter(|spec| spec.required) {
        if !map.contains_key(spec.name) {
            return Err(SchemaError::MissingRequiredField {
                entity,
                field: child_path(path, spec.name),
            });
        }
    }

    for spec in table {
        match map.get(spec.name) {
            None => {}
            Some(Value::Null) if !spec.required => {}
            Some(v) if spec.kind.matches(v) => {}
            Some(v) => return Err(mismatch(entity, child_path(path, spec.name), spec.kind, v)),
        }
    }

    Ok(Record { entity, path, map })
}

/// Collapse a string-or-lines value into one string.
///
/// Lines are joined with a single space; any non-string line rejects the
/// whole value.
pub(crate) fn join_lines(entity: Entity, path: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Array(items) => {
            let mut lines = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(line) => lines.push(line),
                    None => {
                        return Err(DomainRuleViolation::NonStringElement {
                            field: index_path(path, index),
                            actual: JsonKind::of(item),
                        }
                        .into())
                    }
                }
            }
            Ok(lines.join(" "))
        }
        other => Err(mismatch(entity, path.to_string(), FieldKind::StringOrArray, other)),
    }
}

fn mismatch(entity: Entity, field: String, expected: FieldKind, value: &Value) -> SchemaError {
    SchemaError::TypeMismatch {
        entity,
        field,
        expected,
        actual: JsonKind::of(value),
    }
}

fn suggest(key: &str, table: &[FieldSpec]) -> Option<String> {
    table
        .iter()
        .map(|spec| (spec.name, similarity(key, spec.name)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name.to_string())
}

fn similarity(key: &str, name: &str) -> f64 {
    let key = key.to_ascii_lowercase();
    let prefix = if key.len() >= 3 && name.starts_with(key.as_str()) {
        0.15
    } else {
        0.0
    };
    (normalized_levenshtein(&key, name) + prefix).min(1.0)
}
