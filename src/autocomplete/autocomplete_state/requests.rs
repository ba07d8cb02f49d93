//! User-driven operations and the requests they issue

use crate::api::ApiRequest;
use crate::autocomplete::autocomplete_state::AutocompleteState;
use crate::record::Record;

impl AutocompleteState {
    /// Fetch full records for the seeded value (if asked to), then run the
    /// initial empty search
    pub fn mount(&mut self) {
        if self.fetch_initial_values {
            self.fetch_initial_values();
        }
        self.check_new_suggestions("", false);
    }

    /// The search box text changed
    pub fn handle_change(&mut self, text: &str) {
        self.input = text.to_string();
        self.check_new_suggestions(text, true);
    }

    /// The user picked a suggestion
    pub fn handle_click(&mut self, record: Record) {
        let value = self.mode.after_click(self.value(), record);
        self.commit(value, true);
    }

    /// The user removed a selected record (multi-select only)
    pub fn handle_remove(&mut self, record: &Record) {
        if self.mode.is_single() {
            return;
        }
        let value = self.mode.after_remove(self.value(), record);
        self.commit(value, true);
    }

    /// Create a record from the search text
    ///
    /// Does nothing when the trimmed text is empty.
    pub fn handle_create(&mut self) {
        let value = self.input.trim().to_string();
        if value.is_empty() {
            return;
        }

        let request_id = self.next_request_id();
        let request = ApiRequest::Create {
            request_id,
            record_type: self.record_type.clone(),
            value,
        };
        if self.send(request) {
            self.pending_creates += 1;
            self.is_loading = true;
        }
    }

    /// Issue a search for `query` unless it was the last one searched
    ///
    /// `check_different = false` bypasses that guard.
    fn check_new_suggestions(&mut self, query: &str, check_different: bool) {
        if check_different && self.last_query.as_deref() == Some(query) {
            return;
        }

        let request_id = self.next_request_id();
        let request = ApiRequest::Search {
            request_id,
            query: query.to_string(),
            record_type: self.record_type.clone(),
            exclude: self.exclusions(),
        };
        self.last_query = Some(query.to_string());
        if self.send(request) {
            self.pending_searches += 1;
        }
    }

    fn fetch_initial_values(&mut self) {
        if self.value().is_empty() {
            return;
        }

        let request_id = self.next_request_id();
        let request = ApiRequest::Objects {
            request_id,
            ids: self.value().joined_ids(),
            record_type: self.record_type.clone(),
        };
        if self.send(request) {
            self.pending_objects += 1;
        }
    }

    fn next_request_id(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }

    /// Hand a request to the worker; false if there is no live worker
    fn send(&self, request: ApiRequest) -> bool {
        let request_id = request.request_id();
        let Some(tx) = &self.request_tx else {
            log::debug!("No API worker attached, dropping request {}", request_id);
            return false;
        };
        if tx.send(request).is_err() {
            log::debug!("API worker gone, dropping request {}", request_id);
            return false;
        }
        true
    }
}
