//! Single- and multi-select behavior
//!
//! The controller only talks to [`SelectionMode`]; [`mode_for`] picks the
//! implementation from the widget's `is_single` flag.

use std::fmt;

use crate::record::Record;
use crate::selection::Selection;

/// How a widget mode turns user intent into a new selection
///
/// Every method returns a fresh [`Selection`]; the current one is never
/// mutated in place.
pub trait SelectionMode: fmt::Debug {
    fn is_single(&self) -> bool;

    /// Coerce a seeded value into this mode's shape
    fn normalize(&self, value: Selection) -> Selection;

    /// Selection after the user picks a suggestion
    fn after_click(&self, current: &Selection, record: Record) -> Selection;

    /// Selection after the user removes a selected record
    fn after_remove(&self, current: &Selection, record: &Record) -> Selection;

    /// Selection after the API created a record from the search text
    fn after_create(&self, current: &Selection, record: Record) -> Selection;

    /// Selection after full records were fetched for the seeded value
    fn after_hydrate(&self, current: &Selection, pages: &[Record]) -> Selection;

    /// Suggestions that may be offered given the current selection
    fn filter_suggestions<'a>(&self, current: &Selection, suggestions: &'a [Record])
    -> Vec<&'a Record>;
}

pub fn mode_for(is_single: bool) -> Box<dyn SelectionMode> {
    if is_single {
        Box::new(SingleMode)
    } else {
        Box::new(MultiMode)
    }
}

/// At most one record; picking replaces it
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleMode;

impl SelectionMode for SingleMode {
    fn is_single(&self) -> bool {
        true
    }

    fn normalize(&self, value: Selection) -> Selection {
        match value {
            Selection::Single(record) => Selection::Single(record),
            Selection::Multi(records) => Selection::Single(records.into_iter().next()),
        }
    }

    fn after_click(&self, _current: &Selection, record: Record) -> Selection {
        Selection::Single(Some(record))
    }

    fn after_remove(&self, current: &Selection, _record: &Record) -> Selection {
        current.clone()
    }

    fn after_create(&self, _current: &Selection, record: Record) -> Selection {
        Selection::Single(Some(record))
    }

    fn after_hydrate(&self, current: &Selection, pages: &[Record]) -> Selection {
        match pages.first() {
            Some(page) => Selection::Single(Some(page.clone())),
            None => current.clone(),
        }
    }

    fn filter_suggestions<'a>(
        &self,
        _current: &Selection,
        suggestions: &'a [Record],
    ) -> Vec<&'a Record> {
        // The server-side exclude already drops the selected record
        suggestions.iter().collect()
    }
}

/// An ordered list of distinct records
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiMode;

impl MultiMode {
    fn append(current: &Selection, record: Record) -> Selection {
        if current.contains(&record.id) {
            return Selection::Multi(current.records().to_vec());
        }
        let mut records = current.records().to_vec();
        records.push(record);
        Selection::Multi(records)
    }
}

impl SelectionMode for MultiMode {
    fn is_single(&self) -> bool {
        false
    }

    fn normalize(&self, value: Selection) -> Selection {
        match value {
            Selection::Multi(records) => Selection::Multi(records),
            Selection::Single(record) => Selection::Multi(record.into_iter().collect()),
        }
    }

    fn after_click(&self, current: &Selection, record: Record) -> Selection {
        Self::append(current, record)
    }

    fn after_remove(&self, current: &Selection, record: &Record) -> Selection {
        Selection::Multi(
            current
                .records()
                .iter()
                .filter(|selected| selected.id != record.id)
                .cloned()
                .collect(),
        )
    }

    fn after_create(&self, current: &Selection, record: Record) -> Selection {
        Self::append(current, record)
    }

    fn after_hydrate(&self, current: &Selection, pages: &[Record]) -> Selection {
        Selection::Multi(
            current
                .records()
                .iter()
                .map(|selected| {
                    pages
                        .iter()
                        .find(|page| page.id == selected.id)
                        .unwrap_or(selected)
                        .clone()
                })
                .collect(),
        )
    }

    fn filter_suggestions<'a>(
        &self,
        current: &Selection,
        suggestions: &'a [Record],
    ) -> Vec<&'a Record> {
        suggestions
            .iter()
            .filter(|suggestion| !current.contains(&suggestion.id))
            .collect()
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod mode_tests;
