//! Host form integration
//!
//! A widget without a change callback publishes its selection through a
//! hidden form field holding the selection's JSON. The server side reads the
//! submitted text back into identifiers with [`value_from_form`].

use serde_json::Value;

use crate::error::AutocompleteError;
use crate::record::Identifier;
use crate::selection::Selection;

/// `<input type="hidden" name=... value=...>`
///
/// Holds the JSON of the live selection, so an empty multi-select is `[]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

impl HiddenField {
    pub fn new(name: &str, selection: &Selection) -> Self {
        Self {
            name: name.to_string(),
            value: selection.to_json(),
        }
    }
}

/// Server-side rendering of an initial value; any empty selection is `null`
pub fn format_value(selection: &Selection) -> String {
    if selection.is_empty() {
        return "null".to_string();
    }
    selection.to_json()
}

/// Identifiers submitted through the hidden field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Empty,
    One(Identifier),
    Many(Vec<Identifier>),
}

/// Decode submitted field text into identifiers
///
/// A missing field, `null`, or any other empty JSON value decodes to
/// [`FormValue::Empty`].
pub fn value_from_form(raw: Option<&str>) -> Result<FormValue, AutocompleteError> {
    let Some(raw) = raw else {
        return Ok(FormValue::Empty);
    };

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| AutocompleteError::InvalidFormValue(e.to_string()))?;

    match value {
        Value::Null | Value::Bool(false) => Ok(FormValue::Empty),
        Value::String(ref s) if s.is_empty() => Ok(FormValue::Empty),
        Value::Array(items) if items.is_empty() => Ok(FormValue::Empty),
        Value::Object(ref map) if map.is_empty() => Ok(FormValue::Empty),
        Value::Array(items) => items
            .iter()
            .map(id_of)
            .collect::<Result<Vec<_>, _>>()
            .map(FormValue::Many),
        Value::Object(_) => id_of(&value).map(FormValue::One),
        other => Err(AutocompleteError::InvalidFormValue(format!(
            "expected a record or a list of records, got {}",
            other
        ))),
    }
}

fn id_of(item: &Value) -> Result<Identifier, AutocompleteError> {
    let id = item
        .get("id")
        .ok_or_else(|| AutocompleteError::InvalidFormValue(format!("missing `id` in {}", item)))?;
    serde_json::from_value(id.clone())
        .map_err(|_| AutocompleteError::InvalidFormValue(format!("invalid `id` {}", id)))
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;
