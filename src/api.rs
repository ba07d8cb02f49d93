//! Autocomplete API access
//!
//! The controller never awaits a request. It sends an [`ApiRequest`] to the
//! worker (see [`worker`]) and later drains [`ApiResponse`]s, each tagged with
//! the `request_id` of the request that produced it.

use std::sync::mpsc::Receiver;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

pub mod client;
pub mod worker;

pub use client::ApiClient;

use crate::record::Record;

/// Errors that can occur while talking to the API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Anything but `200 OK`
    #[error("API error ({code}): {message}")]
    Status { code: u16, message: String },

    /// Body is not JSON, or lacks the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Request messages sent to the API worker
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// `GET {api_base}search/`
    Search {
        request_id: u64,
        query: String,
        record_type: String,
        /// Comma-joined identifiers of the current selection
        exclude: String,
    },
    /// `GET {api_base}objects/`
    Objects {
        request_id: u64,
        /// Comma-joined identifiers to resolve
        ids: String,
        record_type: String,
    },
    /// `POST {api_base}create/`
    Create {
        request_id: u64,
        record_type: String,
        value: String,
    },
}

impl ApiRequest {
    pub fn request_id(&self) -> u64 {
        match self {
            ApiRequest::Search { request_id, .. }
            | ApiRequest::Objects { request_id, .. }
            | ApiRequest::Create { request_id, .. } => *request_id,
        }
    }
}

/// Response messages received from the API worker
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Search {
        request_id: u64,
        result: Result<Vec<Record>, ApiError>,
    },
    Objects {
        request_id: u64,
        result: Result<Vec<Record>, ApiError>,
    },
    Created {
        request_id: u64,
        result: Result<Record, ApiError>,
    },
}

impl ApiResponse {
    pub fn request_id(&self) -> u64 {
        match self {
            ApiResponse::Search { request_id, .. }
            | ApiResponse::Objects { request_id, .. }
            | ApiResponse::Created { request_id, .. } => *request_id,
        }
    }
}

/// Spawn a worker for `client` and return the controller's channel ends
pub fn connect(client: ApiClient) -> (UnboundedSender<ApiRequest>, Receiver<ApiResponse>) {
    let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();
    let (response_tx, response_rx) = std::sync::mpsc::channel();
    worker::spawn_worker(client, request_rx, response_tx);
    (request_tx, response_rx)
}
