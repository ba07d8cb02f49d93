//! Suggestion list view model
//!
//! Pure functions of [`SuggestionListProps`]: which rows to show and what a
//! row activation means. The list holds no state; the host keeps track of the
//! highlighted row.

use crate::record::Record;

/// User intent reported by the view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A suggestion was picked
    Click(Record),
    /// The search text changed
    Change(String),
    /// The create row was activated
    Create,
    /// A selected record was removed
    Remove(Record),
}

/// Everything the suggestion list renders from
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionListProps<'a> {
    /// Suggestions left after the selection mode's filtering
    pub suggestions: Vec<&'a Record>,
    /// Creation is allowed and the trimmed input is non-empty
    pub can_create: bool,
    pub input: &'a str,
    /// A create request is in flight
    pub is_loading: bool,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionRow<'a> {
    Suggestion(&'a Record),
    /// Offer to create a record from the trimmed input
    Create(&'a str),
}

impl<'a> SuggestionListProps<'a> {
    pub fn rows(&self) -> Vec<SuggestionRow<'a>> {
        let mut rows: Vec<SuggestionRow<'a>> = self
            .suggestions
            .iter()
            .map(|record| SuggestionRow::Suggestion(*record))
            .collect();
        if self.can_create {
            rows.push(SuggestionRow::Create(self.input.trim()));
        }
        rows
    }

    pub fn row_count(&self) -> usize {
        self.suggestions.len() + usize::from(self.can_create)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Event for activating the row at `index`
    pub fn activate(&self, index: usize) -> Option<ViewEvent> {
        match self.rows().get(index)? {
            SuggestionRow::Suggestion(record) => Some(ViewEvent::Click((*record).clone())),
            SuggestionRow::Create(_) => Some(ViewEvent::Create),
        }
    }

    /// Event for a search text edit
    pub fn change(&self, text: &str) -> ViewEvent {
        ViewEvent::Change(text.to_string())
    }
}

#[cfg(test)]
#[path = "suggestion_list_tests.rs"]
mod suggestion_list_tests;
