//! SDK error types using thiserror 2.0.
//!
//! All failures are fatal to the in-flight call: nothing in this crate
//! retries, backs off, or swallows an error.

use thiserror::Error;

/// Errors surfaced by SDK operations.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Token endpoint unreachable, non-2xx, or response missing `access_token`
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// An API endpoint returned a non-2xx status; carries the parsed error body
    #[error("API request failed with status {status}: {body}")]
    Api {
        /// HTTP status code of the failed response
        status: u16,
        /// Parsed JSON error body returned by the server
        body: serde_json::Value,
    },

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A request URL could not be constructed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// Create an authentication error.
    #[must_use]
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// HTTP status of the failed API call, when this is an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
