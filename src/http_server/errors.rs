//! # HTTP Errors
//!
//! Maps every rejected request to a status code and a JSON body:
//! `{"error": ...}`, plus `validationErrors` when fields failed validation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::students::{ConflictField, FieldErrors, Operation, ServiceError};

/// Result type for HTTP handlers
pub type RestResult<T> = Result<T, RestError>;

/// HTTP-facing errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Fields failed validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Natural key already held by another record
    #[error("{0}")]
    Conflict(ConflictField),

    /// UNIQUE constraint tripped despite the pre-check
    #[error("Student ID or email already exists")]
    DuplicateKey,

    /// Body was not a JSON object of string fields
    #[error("Invalid request body")]
    InvalidBody,

    /// Query string could not be read
    #[error("Invalid query string")]
    InvalidQuery,

    /// Unknown or malformed student id
    #[error("Student not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage failure, reported without detail
    #[error("{}", .0.failure_message())]
    Internal(Operation),
}

impl RestError {
    /// Translate a service outcome for the operation that produced it.
    pub fn from_service(err: ServiceError, op: Operation) -> Self {
        match err {
            ServiceError::Validation(errors) => RestError::Validation(errors),
            ServiceError::Conflict(field) => RestError::Conflict(field),
            ServiceError::DuplicateKey => RestError::DuplicateKey,
            ServiceError::NotFound => RestError::NotFound,
            ServiceError::Storage(_) => RestError::Internal(op),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::Conflict(_) => StatusCode::BAD_REQUEST,
            RestError::DuplicateKey => StatusCode::BAD_REQUEST,
            RestError::InvalidBody => StatusCode::BAD_REQUEST,
            RestError::InvalidQuery => StatusCode::BAD_REQUEST,

            RestError::NotFound => StatusCode::NOT_FOUND,

            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "validationErrors", skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<FieldErrors>,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        let error = err.to_string();
        let validation_errors = match err {
            RestError::Validation(errors) => Some(errors),
            _ => None,
        };
        Self {
            error,
            validation_errors,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
