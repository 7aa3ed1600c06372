//! Error types for the to-do service client and configuration

use thiserror::Error;

/// Errors that can occur when talking to the remote to-do service
///
/// Every variant renders to a human-readable message; that message is what
/// ends up in `TodoListState::error`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection refused, TLS...)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The response body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Environment variable name
        key: &'static str,
        /// Raw value found
        value: String,
        /// Why it was rejected
        reason: String,
    },
}
