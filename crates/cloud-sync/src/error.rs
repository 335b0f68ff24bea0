//! Error types for the cloud sync crate.

use thiserror::Error;

/// Result type alias for cloud sync operations.
pub type Result<T> = std::result::Result<T, CloudSyncError>;

/// Errors that can occur talking to the remote store.
#[derive(Debug, Error)]
pub enum CloudSyncError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx response from the remote store, raw body preserved
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    /// Distinct from an empty result: a contract change must not degrade
    /// silently into "no data".
    #[error("Decode error in {context}: {message}")]
    Decode { context: String, message: String },

    /// A PATCH matched no row; reported distinctly from a write error
    #[error("No matching row in {collection}")]
    NoMatchingRow { collection: String },

    /// Invalid request (missing required data, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication error (malformed API key)
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl CloudSyncError {
    /// Create an API error from status and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an auth error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<CloudSyncError> for showdesk_core::Error {
    fn from(err: CloudSyncError) -> Self {
        let status = err.status_code();
        showdesk_core::Error::remote(status, err.to_string())
    }
}
