//! The autocomplete controller and its suggestion list view

pub mod autocomplete_render;
mod autocomplete_state;
pub mod suggestion_list;

pub use autocomplete_render::{render_selection, render_suggestions};
pub use autocomplete_state::{AutocompleteState, ChangeCallback, ChangeEvent, Phase};
pub use suggestion_list::{SuggestionListProps, SuggestionRow, ViewEvent};
