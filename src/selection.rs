//! Selection values and who owns them

pub mod mode;

use serde::{Deserialize, Serialize};

use crate::error::AutocompleteError;
use crate::record::{Identifier, Record, join_ids};

pub use mode::{MultiMode, SelectionMode, SingleMode, mode_for};

/// The chosen record(s)
///
/// Serializes as `null`, a record object, or an array of records, which is
/// also the hidden form-field format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// Ordered by click order
    Multi(Vec<Record>),
    Single(Option<Record>),
}

impl Selection {
    /// Parse a selection from its JSON form
    pub fn from_json(raw: &str) -> Result<Self, AutocompleteError> {
        serde_json::from_str(raw).map_err(|e| AutocompleteError::InvalidValue(e.to_string()))
    }

    pub fn records(&self) -> &[Record] {
        match self {
            Selection::Multi(records) => records,
            Selection::Single(Some(record)) => std::slice::from_ref(record),
            Selection::Single(None) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.records().iter().any(|record| &record.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &Identifier> {
        self.records().iter().map(|record| &record.id)
    }

    /// Comma-joined identifiers: a single id, a list, or empty
    pub fn joined_ids(&self) -> String {
        join_ids(self.ids())
    }

    /// JSON text of the selection (`null` when single and empty)
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("Failed to serialize selection: {}", e);
            "null".to_string()
        })
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Single(None)
    }
}

/// Which side holds the authoritative selection
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource {
    /// The host re-supplies the value after every change notification
    HostOwned(Selection),
    /// The widget keeps its own value
    SelfOwned(Selection),
}

impl ValueSource {
    pub fn new(controlled: bool, value: Selection) -> Self {
        if controlled {
            ValueSource::HostOwned(value)
        } else {
            ValueSource::SelfOwned(value)
        }
    }

    pub fn current(&self) -> &Selection {
        match self {
            ValueSource::HostOwned(value) | ValueSource::SelfOwned(value) => value,
        }
    }

    pub fn is_host_owned(&self) -> bool {
        matches!(self, ValueSource::HostOwned(_))
    }

    /// Record a widget-driven change; host-owned values wait for the host
    pub fn commit(&mut self, value: Selection) {
        if let ValueSource::SelfOwned(current) = self {
            *current = value;
        }
    }

    /// Replace the host value; returns false when the widget owns the value
    pub fn set_host(&mut self, value: Selection) -> bool {
        match self {
            ValueSource::HostOwned(current) => {
                *current = value;
                true
            }
            ValueSource::SelfOwned(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
