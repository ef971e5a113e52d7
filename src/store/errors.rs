//! # Store Errors
//!
//! Error types for the record store.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A UNIQUE constraint rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other SQLite failure
    #[error("database error: {0}")]
    Database(rusqlite::Error),

    /// Connection mutex poisoned by a panicking writer
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Filesystem error while preparing the database path
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True for errors the caller should report as a natural-key collision.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation
                    && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::UniqueViolation(
                    message.unwrap_or_else(|| "UNIQUE constraint failed".to_string()),
                )
            }
            other => StoreError::Database(other),
        }
    }
}
