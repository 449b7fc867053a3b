//! Field values exposed by documents for lookups and uniqueness checks

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Null,
}

impl FieldValue {
    /// Canonical string form used for equality lookups
    ///
    /// Returns `None` for `Null`, so absent values never collide on a unique field.
    pub fn as_key(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Uuid(u) => Some(u.to_string()),
            FieldValue::Null => None,
        }
    }

    /// Compare against a raw query-string value
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            FieldValue::Float(f) => raw.parse::<f64>().is_ok_and(|r| r == *f),
            other => other.as_key().is_some_and(|k| k == raw),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<Option<Uuid>> for FieldValue {
    fn from(value: Option<Uuid>) -> Self {
        value.map(FieldValue::Uuid).unwrap_or(FieldValue::Null)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}
