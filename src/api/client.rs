//! HTTP client for the autocomplete endpoints
//!
//! `search/` and `objects/` answer `{"pages": [Record, ...]}`; `create/`
//! answers a single record. Only `200 OK` counts as success.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use super::ApiError;
use crate::config::HttpConfig;
use crate::error::AutocompleteError;
use crate::record::Record;

const USER_AGENT: &str = concat!("cms-autocomplete/", env!("CARGO_PKG_VERSION"));

/// Autocomplete API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl ApiClient {
    /// Create a client with default HTTP settings
    pub fn new(api_base: &str) -> Result<Self, AutocompleteError> {
        Self::with_config(api_base, &HttpConfig::default())
    }

    pub fn with_config(api_base: &str, config: &HttpConfig) -> Result<Self, AutocompleteError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_deref().unwrap_or(USER_AGENT));
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let http = builder
            .build()
            .map_err(|e| AutocompleteError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Search records of `record_type` matching `query`
    pub async fn search(
        &self,
        query: &str,
        record_type: &str,
        exclude: &str,
    ) -> Result<Vec<Record>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("search/"))
            .query(&[("query", query), ("type", record_type), ("exclude", exclude)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_pages(read_body(response).await?)
    }

    /// Resolve full records for comma-joined `ids`
    pub async fn objects(&self, ids: &str, record_type: &str) -> Result<Vec<Record>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("objects/"))
            .query(&[("ids", ids), ("type", record_type)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_pages(read_body(response).await?)
    }

    /// Create a record of `record_type` from a single string value
    pub async fn create(&self, record_type: &str, value: &str) -> Result<Record, ApiError> {
        let response = self
            .http
            .post(self.endpoint("create/"))
            .form(&[("type", record_type), ("value", value)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body = read_body(response).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

async fn read_body(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if status != StatusCode::OK {
        return Err(ApiError::Status {
            code: status.as_u16(),
            message: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))
}

fn parse_pages(mut body: Value) -> Result<Vec<Record>, ApiError> {
    match body.get_mut("pages").map(Value::take) {
        Some(pages @ Value::Array(_)) => {
            serde_json::from_value(pages).map_err(|e| ApiError::Malformed(e.to_string()))
        }
        Some(_) => Err(ApiError::Malformed("`pages` is not an array".to_string())),
        None => Err(ApiError::Malformed("missing `pages`".to_string())),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
