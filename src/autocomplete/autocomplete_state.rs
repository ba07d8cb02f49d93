//! Autocomplete controller state
//!
//! Owns the selection, the search input and the suggestion list, and talks to
//! the API worker through channels. All mutation happens on the caller's
//! thread: requests are fire-and-continue, and their responses are applied by
//! [`AutocompleteState::poll_responses`].

use std::fmt;
use std::sync::mpsc::Receiver;

use tokio::sync::mpsc::UnboundedSender;

use crate::api::{ApiRequest, ApiResponse};
use crate::autocomplete::suggestion_list::SuggestionListProps;
use crate::config::{StaleResponsePolicy, WidgetConfig};
use crate::form::HiddenField;
use crate::record::Record;
use crate::selection::{Selection, SelectionMode, ValueSource, mode_for};

mod requests;
mod responses;

/// Change notification sent to the host
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub value: Selection,
    /// True for picks and removals made in the widget, false for changes
    /// driven by API responses (hydration, creation)
    pub from_suggestion: bool,
}

pub type ChangeCallback = Box<dyn FnMut(&ChangeEvent)>;

/// What the widget is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    Creating,
}

/// Autocomplete controller
pub struct AutocompleteState {
    /// Hidden form field name
    name: String,
    record_type: String,
    can_create: bool,
    fetch_initial_values: bool,
    stale_responses: StaleResponsePolicy,
    mode: Box<dyn SelectionMode>,
    value: ValueSource,
    /// Raw text of the search box
    input: String,
    /// Records from the latest applied search response
    suggestions: Vec<Record>,
    /// A create request is in flight
    is_loading: bool,
    on_change: Option<ChangeCallback>,
    /// Query of the last issued search; `None` until the first one
    last_query: Option<String>,
    /// Last id handed out, shared by all request kinds
    request_id: u64,
    /// Highest search request id whose response was applied
    applied_search_id: u64,
    pending_searches: usize,
    pending_creates: usize,
    pending_objects: usize,
    request_tx: Option<UnboundedSender<ApiRequest>>,
    response_rx: Option<Receiver<ApiResponse>>,
}

impl AutocompleteState {
    /// Create a controller; performs no I/O until [`mount`](Self::mount)
    pub fn new(config: &WidgetConfig, value: Selection) -> Self {
        let mode = mode_for(config.is_single);
        let value = mode.normalize(value);

        Self {
            name: config.name.clone(),
            record_type: config.record_type.clone(),
            can_create: config.can_create,
            fetch_initial_values: config.fetch_initial_values,
            stale_responses: config.stale_responses,
            mode,
            value: ValueSource::new(config.controlled, value),
            input: String::new(),
            suggestions: Vec::new(),
            is_loading: false,
            on_change: None,
            last_query: None,
            request_id: 0,
            applied_search_id: 0,
            pending_searches: 0,
            pending_creates: 0,
            pending_objects: 0,
            request_tx: None,
            response_rx: None,
        }
    }

    /// Notify `callback` on every selection change
    ///
    /// A widget with a callback does not expose a hidden form field.
    pub fn with_on_change(mut self, callback: impl FnMut(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set the channel handles for communication with the API worker
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<ApiRequest>,
        response_rx: Receiver<ApiResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Spawn an API worker for `client` and attach to it
    pub fn connect(&mut self, client: crate::api::ApiClient) {
        let (request_tx, response_rx) = crate::api::connect(client);
        self.set_channels(request_tx, response_rx);
    }

    /// Authoritative selection: the host's value when controlled, else our own
    pub fn value(&self) -> &Selection {
        self.value.current()
    }

    /// Replace the value of a controlled widget
    ///
    /// Ignored when the widget owns its value.
    pub fn set_host_value(&mut self, value: Selection) {
        let value = self.mode.normalize(value);
        if !self.value.set_host(value) {
            log::debug!("Ignoring host value for uncontrolled widget {}", self.name);
        }
    }

    pub fn is_single(&self) -> bool {
        self.mode.is_single()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[Record] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Identifiers of the current selection, computed at call time
    pub fn exclusions(&self) -> String {
        self.value().joined_ids()
    }

    pub fn phase(&self) -> Phase {
        if self.pending_creates > 0 {
            Phase::Creating
        } else if self.pending_searches > 0 {
            Phase::Searching
        } else {
            Phase::Idle
        }
    }

    /// Whether any request is still waiting for its response
    pub fn has_pending_requests(&self) -> bool {
        self.pending_searches + self.pending_creates + self.pending_objects > 0
    }

    /// Props for the suggestion list view
    pub fn props(&self) -> SuggestionListProps<'_> {
        SuggestionListProps {
            suggestions: self.mode.filter_suggestions(self.value(), &self.suggestions),
            can_create: self.can_create && !self.input.trim().is_empty(),
            input: &self.input,
            is_loading: self.is_loading,
        }
    }

    /// Hidden form field carrying the selection, for hosts without a callback
    pub fn hidden_field(&self) -> Option<HiddenField> {
        if self.on_change.is_some() {
            return None;
        }
        Some(HiddenField::new(&self.name, self.value()))
    }

    /// Apply a selection change and tell the host about it
    fn commit(&mut self, value: Selection, from_suggestion: bool) {
        self.value.commit(value.clone());
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&ChangeEvent {
                value,
                from_suggestion,
            });
        }
    }
}

impl fmt::Debug for AutocompleteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteState")
            .field("name", &self.name)
            .field("record_type", &self.record_type)
            .field("mode", &self.mode)
            .field("value", &self.value)
            .field("input", &self.input)
            .field("suggestions", &self.suggestions.len())
            .field("is_loading", &self.is_loading)
            .field("phase", &self.phase())
            .finish()
    }
}

#[cfg(test)]
#[path = "autocomplete_state_tests.rs"]
mod autocomplete_state_tests;
