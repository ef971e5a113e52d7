//! Field validator for student writes
//!
//! Validation semantics:
//! - Every field is checked, a failure in one never hides another
//! - Within a field the first failing rule wins
//! - Pure and deterministic, no store access
//!
//! Rule order per field is required, too short, too long, then shape
//! (email checks shape before length).

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::model::{Field, StudentFields};

pub const STUDENT_ID_MIN_CHARS: usize = 3;
pub const STUDENT_ID_MAX_CHARS: usize = 20;
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 15;

static STUDENT_ID_PATTERN: OnceLock<Regex> = OnceLock::new();
static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();
static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Per-field error messages, keyed in field order.
pub type FieldErrors = BTreeMap<Field, String>;

/// Outcome of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    errors: FieldErrors,
}

impl Validation {
    /// True when no field failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The failing fields and their messages.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Message for a single field, if it failed.
    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// Validate a sanitized record.
pub fn validate(fields: &StudentFields) -> Validation {
    let mut errors = FieldErrors::new();

    for field in Field::ALL {
        let failure = match field {
            Field::StudentId => check_student_id(&fields.student_id),
            Field::Name => check_name(&fields.name),
            Field::Email => check_email(&fields.email),
            Field::Phone => check_phone(&fields.phone),
        };
        if let Some(message) = failure {
            errors.insert(field, message.to_string());
        }
    }

    Validation { errors }
}

fn check_student_id(value: &str) -> Option<&'static str> {
    let chars = value.chars().count();
    if value.trim().is_empty() {
        Some("Student ID is required")
    } else if chars < STUDENT_ID_MIN_CHARS {
        Some("Student ID must be at least 3 characters")
    } else if chars > STUDENT_ID_MAX_CHARS {
        Some("Student ID must be at most 20 characters")
    } else if !pattern(&STUDENT_ID_PATTERN, r"^[A-Za-z0-9_-]+$").is_match(value) {
        Some("Student ID can only contain letters, numbers, hyphens, and underscores")
    } else {
        None
    }
}

fn check_name(value: &str) -> Option<&'static str> {
    let name = value.trim();
    let chars = name.chars().count();
    if name.is_empty() {
        Some("Full name is required")
    } else if chars < NAME_MIN_CHARS {
        Some("Name must be at least 2 characters")
    } else if chars > NAME_MAX_CHARS {
        Some("Name must be at most 100 characters")
    } else if !pattern(&NAME_PATTERN, r"^[a-zA-Z\s'-]+$").is_match(name) {
        Some("Name can only contain letters, spaces, apostrophes, and hyphens")
    } else {
        None
    }
}

fn check_email(value: &str) -> Option<&'static str> {
    let email = value.trim();
    if email.is_empty() {
        Some("Email address is required")
    } else if !pattern(&EMAIL_PATTERN, r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_match(email) {
        Some("Please enter a valid email address")
    } else if email.chars().count() > EMAIL_MAX_CHARS {
        Some("Email address is too long")
    } else {
        None
    }
}

fn check_phone(value: &str) -> Option<&'static str> {
    let phone = value.trim();
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if phone.is_empty() {
        Some("Phone number is required")
    } else if digits < PHONE_MIN_DIGITS {
        Some("Phone number must be at least 10 digits")
    } else if digits > PHONE_MAX_DIGITS {
        Some("Phone number must be at most 15 digits")
    } else if !pattern(&PHONE_PATTERN, r"^[0-9\s\-()+]+$").is_match(phone) {
        Some("Phone number can only contain digits, spaces, hyphens, parentheses, and plus sign")
    } else {
        None
    }
}

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("validation pattern must compile"))
}
