//! Student Form State Machine
//!
//! Tracks one create or edit form against the HTTP API:
//! - Idle: nothing sent yet, or the form was reset
//! - Submitting: a request is in flight; further submits are refused
//! - Success: the server returned the saved record
//! - FieldErrors: the server rejected individual fields
//! - GenericError: any other failure, shown as a single message
//!
//! Transitions consume the current state and return the next one, so an
//! illegal transition leaves the caller holding nothing stale.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::students::{Field, FieldErrors, Student};

/// Message shown when the server gives no usable error.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Message shown when the request never reached the server.
pub const NETWORK_MESSAGE: &str = "Network error. Please try again.";

/// Form errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("illegal form transition: {action} while {state}")]
    IllegalTransition {
        action: &'static str,
        state: &'static str,
    },
}

pub type FormResult<T> = Result<T, FormError>;

/// Submission state of a student form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Success(Student),
    FieldErrors(FieldErrors),
    GenericError(String),
}

/// Error body as the API returns it.
///
/// `validationErrors` is read loosely: unknown keys and non-string
/// messages are skipped rather than failing the whole body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default, rename = "validationErrors")]
    validation_errors: Option<Value>,
}

impl ErrorBody {
    fn field_errors(&self) -> Option<FieldErrors> {
        let errors: FieldErrors = self
            .validation_errors
            .as_ref()?
            .as_object()?
            .iter()
            .filter_map(|(name, message)| {
                Some((Field::from_name(name)?, message.as_str()?.to_string()))
            })
            .collect();
        (!errors.is_empty()).then_some(errors)
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Short name of the state, used in transition errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success(_) => "success",
            Self::FieldErrors(_) => "field-errors",
            Self::GenericError(_) => "generic-error",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Message for one field, if the last response rejected it.
    pub fn field_error(&self, field: Field) -> Option<&str> {
        match self {
            Self::FieldErrors(errors) => errors.get(&field).map(String::as_str),
            _ => None,
        }
    }

    /// Send the form. Clears any previous outcome.
    pub fn submit(self) -> FormResult<Self> {
        match self {
            Self::Submitting => Err(self.illegal("submit")),
            _ => Ok(Self::Submitting),
        }
    }

    /// Apply the server's response to an in-flight submit.
    pub fn receive(self, status: u16, body: &str) -> FormResult<Self> {
        if !self.is_submitting() {
            return Err(self.illegal("receive"));
        }

        if (200..300).contains(&status) {
            return Ok(match serde_json::from_str::<Student>(body) {
                Ok(student) => Self::Success(student),
                Err(_) => Self::GenericError(FALLBACK_MESSAGE.to_string()),
            });
        }

        let parsed = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(Self::GenericError(FALLBACK_MESSAGE.to_string())),
        };

        if status == 400 {
            if let Some(errors) = parsed.field_errors() {
                return Ok(Self::FieldErrors(errors));
            }
        }

        Ok(match parsed.error {
            Some(message) if !message.is_empty() => Self::GenericError(message),
            _ => Self::GenericError(FALLBACK_MESSAGE.to_string()),
        })
    }

    /// The request failed before a response arrived.
    pub fn network_failure(self) -> FormResult<Self> {
        if !self.is_submitting() {
            return Err(self.illegal("network_failure"));
        }
        Ok(Self::GenericError(NETWORK_MESSAGE.to_string()))
    }

    /// Close or reopen the form.
    pub fn reset(self) -> FormResult<Self> {
        match self {
            Self::Submitting => Err(self.illegal("reset")),
            _ => Ok(Self::Idle),
        }
    }

    fn illegal(&self, action: &'static str) -> FormError {
        FormError::IllegalTransition {
            action,
            state: self.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDENT: &str = r#"{
        "id": 1,
        "studentId": "STU001",
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "555-010-0100",
        "createdAt": "2026-01-05T10:00:00Z"
    }"#;

    fn submitting() -> FormState {
        FormState::new().submit().unwrap()
    }

    #[test]
    fn test_success_carries_record() {
        let state = submitting().receive(201, STUDENT).unwrap();
        match state {
            FormState::Success(student) => assert_eq!(student.student_id, "STU001"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors_map_to_fields() {
        let body = r#"{"error":"Validation failed","validationErrors":{"email":"Please enter a valid email address"}}"#;
        let state = submitting().receive(400, body).unwrap();
        assert_eq!(
            state.field_error(Field::Email),
            Some("Please enter a valid email address")
        );
        assert_eq!(state.field_error(Field::Name), None);
    }

    #[test]
    fn test_unknown_error_keys_are_skipped() {
        let body = r#"{"error":"Validation failed","validationErrors":{"email":"bad","nickname":"x"}}"#;
        let state = submitting().receive(400, body).unwrap();

        let mut expected = FieldErrors::new();
        expected.insert(Field::Email, "bad".to_string());
        assert_eq!(state, FormState::FieldErrors(expected));
    }

    #[test]
    fn test_unusable_error_map_keeps_server_message() {
        for body in [
            r#"{"error":"Validation failed","validationErrors":{"nickname":"x"}}"#,
            r#"{"error":"Validation failed","validationErrors":"oops"}"#,
        ] {
            let state = submitting().receive(400, body).unwrap();
            assert_eq!(state, FormState::GenericError("Validation failed".into()), "{body}");
        }
    }

    #[test]
    fn test_conflict_is_generic_message() {
        let state = submitting()
            .receive(400, r#"{"error":"Student ID already exists"}"#)
            .unwrap();
        assert_eq!(state, FormState::GenericError("Student ID already exists".into()));
    }

    #[test]
    fn test_unreadable_error_falls_back() {
        let state = submitting().receive(500, "<html>").unwrap();
        assert_eq!(state, FormState::GenericError(FALLBACK_MESSAGE.into()));
    }

    #[test]
    fn test_network_failure() {
        let state = submitting().network_failure().unwrap();
        assert_eq!(state, FormState::GenericError(NETWORK_MESSAGE.into()));
    }

    #[test]
    fn test_resubmit_clears_errors() {
        let state = submitting()
            .receive(400, r#"{"error":"Email address already exists"}"#)
            .unwrap();
        assert_eq!(state.submit().unwrap(), FormState::Submitting);
    }

    #[test]
    fn test_double_submit_is_illegal() {
        let err = submitting().submit().unwrap_err();
        assert_eq!(
            err,
            FormError::IllegalTransition {
                action: "submit",
                state: "submitting"
            }
        );
    }

    #[test]
    fn test_receive_requires_submitting() {
        assert!(FormState::new().receive(200, STUDENT).is_err());
        assert!(FormState::new().network_failure().is_err());
    }

    #[test]
    fn test_reset() {
        assert!(submitting().reset().is_err());
        let done = submitting().receive(201, STUDENT).unwrap();
        assert_eq!(done.reset().unwrap(), FormState::Idle);
    }
}
