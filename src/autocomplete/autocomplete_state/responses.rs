//! Applying API responses

use std::sync::mpsc::TryRecvError;

use crate::api::ApiResponse;
use crate::autocomplete::autocomplete_state::AutocompleteState;
use crate::config::StaleResponsePolicy;

impl AutocompleteState {
    /// Apply every response that has arrived, without blocking
    ///
    /// Returns true if at least one response was received.
    pub fn poll_responses(&mut self) -> bool {
        let mut received = false;

        loop {
            let response = match self.response_rx.as_ref().map(|rx| rx.try_recv()) {
                Some(Ok(response)) => response,
                Some(Err(TryRecvError::Disconnected)) => {
                    log::debug!("API worker disconnected");
                    self.response_rx = None;
                    break;
                }
                Some(Err(TryRecvError::Empty)) | None => break,
            };
            self.apply_response(response);
            received = true;
        }

        received
    }

    /// Apply one response; failures are logged and otherwise ignored
    pub fn apply_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Search { request_id, result } => {
                self.pending_searches = self.pending_searches.saturating_sub(1);
                let pages = match result {
                    Ok(pages) => pages,
                    Err(e) => {
                        log::debug!("Search {} failed: {}", request_id, e);
                        return;
                    }
                };

                if self.stale_responses == StaleResponsePolicy::Discard
                    && request_id < self.applied_search_id
                {
                    log::debug!(
                        "Discarding stale search {} (applied: {})",
                        request_id,
                        self.applied_search_id
                    );
                    return;
                }

                self.applied_search_id = self.applied_search_id.max(request_id);
                self.suggestions = pages;
            }
            ApiResponse::Objects { request_id, result } => {
                self.pending_objects = self.pending_objects.saturating_sub(1);
                match result {
                    Ok(pages) => {
                        let value = self.mode.after_hydrate(self.value(), &pages);
                        self.commit(value, false);
                    }
                    Err(e) => log::debug!("Fetching initial values {} failed: {}", request_id, e),
                }
            }
            ApiResponse::Created { request_id, result } => {
                self.pending_creates = self.pending_creates.saturating_sub(1);
                self.is_loading = self.pending_creates > 0;
                match result {
                    Ok(record) => {
                        let value = self.mode.after_create(self.value(), record);
                        self.commit(value, false);
                    }
                    Err(e) => log::debug!("Create {} failed: {}", request_id, e),
                }
            }
        }
    }
}
