//! # Student Write Errors
//!
//! Outcomes that reject a request, grouped the way callers report them:
//! field errors, natural-key collisions, unknown ids, and storage failures.

use thiserror::Error;

use super::conflict::ConflictField;
use super::validator::FieldErrors;
use crate::store::StoreError;

/// Result type for student operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Reasons a student operation did not complete
#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more fields failed validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Pre-write check found another record holding a natural key
    #[error("{0}")]
    Conflict(ConflictField),

    /// The table's UNIQUE constraint rejected the write
    #[error("Student ID or email already exists")]
    DuplicateKey,

    /// No student with the requested id
    #[error("Student not found")]
    NotFound,

    /// Unexpected storage failure
    #[error("storage failure: {0}")]
    Storage(StoreError),
}

impl ServiceError {
    /// True for rejections caused by a natural-key collision.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Conflict(_) | ServiceError::DuplicateKey)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        if err.is_unique_violation() {
            ServiceError::DuplicateKey
        } else {
            ServiceError::Storage(err)
        }
    }
}
