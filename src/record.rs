//! Records returned by the autocomplete API

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Opaque record key, unique within a record type
///
/// Comparison is strict: `Int(1)` and `Str("1")` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Str(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(id) => write!(f, "{}", id),
            Identifier::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for Identifier {
    fn from(id: i64) -> Self {
        Identifier::Int(id)
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Identifier::Str(id.to_string())
    }
}

impl From<String> for Identifier {
    fn from(id: String) -> Self {
        Identifier::Str(id)
    }
}

/// A record snapshot: `{ id, label, ...opaque fields }`
///
/// A record seeded from a form may carry only its `id`; the empty label is
/// left out when serializing so such partial values round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Identifier,
    #[serde(
        default,
        deserialize_with = "label_from_any",
        skip_serializing_if = "String::is_empty"
    )]
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<Identifier>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            extra: Map::new(),
        }
    }

    /// A record known only by its identifier
    pub fn partial(id: impl Into<Identifier>) -> Self {
        Self::new(id, "")
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_partial(&self) -> bool {
        self.label.is_empty()
    }
}

/// `null` reads as no label; numbers and other scalars use their JSON text
fn label_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(label) => label,
        other => other.to_string(),
    })
}

/// Join identifiers with commas, the list format the API expects
pub fn join_ids<'a>(ids: impl IntoIterator<Item = &'a Identifier>) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
