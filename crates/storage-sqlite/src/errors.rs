//! Storage-layer error mapping into the core error type.

use showdesk_core::errors::{DatabaseError, Error};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Connection pool error: {0}")]
    Pool(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Query(e) => Error::Database(DatabaseError::QueryFailed(e.to_string())),
            StorageError::Pool(message) => Error::Database(DatabaseError::Pool(message)),
        }
    }
}
