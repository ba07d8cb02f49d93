//! API Worker Thread
//!
//! Runs API requests in a background thread so the controller never blocks.
//! Receives requests via channel, performs each one as its own task, and
//! sends every response back to the controller's thread.
//!
//! Requests are never cancelled and may finish in any order; ordering is the
//! controller's concern (see the stale-response policy).

use std::sync::mpsc::Sender;

use tokio::sync::mpsc::UnboundedReceiver;

use super::client::ApiClient;
use super::{ApiRequest, ApiResponse};

/// Spawn the API worker thread
///
/// The thread owns a current-thread tokio runtime and keeps serving until the
/// request channel is closed.
pub fn spawn_worker(
    client: ApiClient,
    request_rx: UnboundedReceiver<ApiRequest>,
    response_tx: Sender<ApiResponse>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                // Requests sent from now on fail to send and are dropped
                log::error!("Failed to start API worker runtime: {}", e);
                return;
            }
        };

        runtime.block_on(worker_loop(client, request_rx, response_tx));
    });
}

/// Main worker loop - processes requests until the channel is closed
async fn worker_loop(
    client: ApiClient,
    mut request_rx: UnboundedReceiver<ApiRequest>,
    response_tx: Sender<ApiResponse>,
) {
    let mut tasks = tokio::task::JoinSet::new();

    loop {
        tokio::select! {
            request = request_rx.recv() => {
                let Some(request) = request else { break };
                log::debug!("Dispatching request {}", request.request_id());
                let client = client.clone();
                let response_tx = response_tx.clone();
                tasks.spawn(async move {
                    let response = handle_request(&client, request).await;
                    if response_tx.send(response).is_err() {
                        log::debug!("Controller gone, dropping response");
                    }
                });
            }
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    // Let in-flight requests deliver before shutting down
    while tasks.join_next().await.is_some() {}
    log::debug!("API worker thread shutting down");
}

/// Perform one request and wrap its outcome
pub(crate) async fn handle_request(client: &ApiClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::Search {
            request_id,
            query,
            record_type,
            exclude,
        } => ApiResponse::Search {
            request_id,
            result: client.search(&query, &record_type, &exclude).await,
        },
        ApiRequest::Objects {
            request_id,
            ids,
            record_type,
        } => ApiResponse::Objects {
            request_id,
            result: client.objects(&ids, &record_type).await,
        },
        ApiRequest::Create {
            request_id,
            record_type,
            value,
        } => ApiResponse::Created {
            request_id,
            result: client.create(&record_type, &value).await,
        },
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
