//! Input normalization applied before validation and storage.

use super::model::{StudentFields, StudentInput};

/// Normalize a raw payload.
///
/// Every field is trimmed and absent fields become empty strings.
/// The email is lower-cased. Total and idempotent.
pub fn sanitize(input: &StudentInput) -> StudentFields {
    StudentFields {
        student_id: trimmed(&input.student_id),
        name: trimmed(&input.name),
        email: trimmed(&input.email).to_lowercase(),
        phone: trimmed(&input.phone),
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}
