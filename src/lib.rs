//! Search-and-select autocomplete widget for CMS record APIs.
//!
//! The [`autocomplete::AutocompleteState`] controller owns the selection, the
//! search input and the suggestion list, and talks to the external API through
//! a background worker (see [`api`]). Single- and multi-select behavior lives in
//! [`selection::mode`].

pub mod api;
pub mod app;
pub mod autocomplete;
pub mod config;
pub mod error;
pub mod form;
pub mod record;
pub mod selection;

#[cfg(test)]
mod test_utils;

pub use autocomplete::{AutocompleteState, ChangeEvent, Phase};
pub use config::{Config, WidgetConfig};
pub use error::AutocompleteError;
pub use record::{Identifier, Record};
pub use selection::Selection;
