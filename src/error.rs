use thiserror::Error;

/// Errors surfaced at the crate boundary
///
/// Request failures never reach this type: the controller drops them (see
/// [`crate::api::ApiError`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutocompleteError {
    #[error("Invalid config file {path}: {message}")]
    Config { path: String, message: String },

    #[error("Invalid initial value: {0}")]
    InvalidValue(String),

    #[error("Invalid form value: {0}")]
    InvalidFormValue(String),

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AutocompleteError {
    fn from(err: std::io::Error) -> Self {
        AutocompleteError::Io(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
