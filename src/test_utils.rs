#[cfg(test)]
pub mod test_helpers {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc::{self, Sender};

    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use crate::api::{ApiRequest, ApiResponse};
    use crate::app::App;
    use crate::autocomplete::{AutocompleteState, ChangeEvent};
    use crate::config::WidgetConfig;
    use crate::record::Record;
    use crate::selection::Selection;

    /// A controller wired to test-owned channel ends instead of a worker
    pub struct Harness {
        pub state: AutocompleteState,
        pub requests: UnboundedReceiver<ApiRequest>,
        pub responses: Sender<ApiResponse>,
    }

    impl Harness {
        pub fn new(mut state: AutocompleteState) -> Self {
            let (request_tx, requests) = unbounded_channel();
            let (responses, response_rx) = mpsc::channel();
            state.set_channels(request_tx, response_rx);
            Self {
                state,
                requests,
                responses,
            }
        }

        /// Requests issued since the last call
        pub fn drain_requests(&mut self) -> Vec<ApiRequest> {
            let mut requests = Vec::new();
            while let Ok(request) = self.requests.try_recv() {
                requests.push(request);
            }
            requests
        }

        /// Deliver a response and let the controller apply it
        pub fn respond(&mut self, response: ApiResponse) {
            self.responses.send(response).unwrap();
            self.state.poll_responses();
        }
    }

    pub fn widget(is_single: bool) -> WidgetConfig {
        WidgetConfig {
            name: "field".to_string(),
            record_type: "page".to_string(),
            can_create: true,
            is_single,
            fetch_initial_values: false,
            api_base: "/api/".to_string(),
            controlled: false,
            ..WidgetConfig::default()
        }
    }

    pub fn record(id: i64) -> Record {
        Record::new(id, format!("Record {}", id))
    }

    pub fn multi(ids: &[i64]) -> Selection {
        Selection::Multi(ids.iter().map(|id| record(*id)).collect())
    }

    /// Change callback that records every event it receives
    pub fn recorder() -> (Rc<RefCell<Vec<ChangeEvent>>>, impl FnMut(&ChangeEvent) + 'static) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        (events, move |event: &ChangeEvent| {
            sink.borrow_mut().push(event.clone())
        })
    }

    pub fn search(request_id: u64, pages: Vec<Record>) -> ApiResponse {
        ApiResponse::Search {
            request_id,
            result: Ok(pages),
        }
    }

    /// Test-owned ends of a widget's worker channels
    pub struct Channels {
        pub requests: UnboundedReceiver<ApiRequest>,
        pub responses: Sender<ApiResponse>,
    }

    impl Channels {
        pub fn drain_requests(&mut self) -> Vec<ApiRequest> {
            let mut requests = Vec::new();
            while let Ok(request) = self.requests.try_recv() {
                requests.push(request);
            }
            requests
        }

        /// Deliver a response to `app` and let it apply it
        pub fn respond(&self, app: &mut App, response: ApiResponse) {
            self.responses.send(response).unwrap();
            app.tick();
        }
    }

    /// App around a widget wired to test-owned channels
    pub fn test_app(config: &WidgetConfig, value: Selection) -> (App, Channels) {
        let mut state = AutocompleteState::new(config, value);
        let (request_tx, requests) = unbounded_channel();
        let (responses, response_rx) = mpsc::channel();
        state.set_channels(request_tx, response_rx);
        (
            App::new(state, config.controlled),
            Channels {
                requests,
                responses,
            },
        )
    }
}
