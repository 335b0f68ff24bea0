//! Error types shared across the showdesk crates.

use thiserror::Error;

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Local database failures, produced by the storage crate.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("{0}")]
    Internal(String),
}

/// Top-level error for domain and sync operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Local database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by the remote replica (HTTP, API or decode)
    #[error("Remote error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// A wire enum value the adapter does not recognize
    #[error("Unrecognized {field} value from remote: '{value}'")]
    UnknownWireValue { field: &'static str, value: String },

    /// Invalid input or state
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Create a remote error from an optional HTTP status and message.
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
