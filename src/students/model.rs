//! Student record types
//!
//! Three shapes move through a write:
//! - [`StudentInput`]: what a client sent, every field optional
//! - [`StudentFields`]: the sanitized four mutable fields
//! - [`Student`]: a persisted row with its server-assigned identity

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned surrogate key.
pub type StudentKey = i64;

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Surrogate key assigned by the store on insert
    pub id: StudentKey,

    /// Natural key, unique across all students
    pub student_id: String,

    /// Display name
    pub name: String,

    /// Contact address, stored lower-cased and unique
    pub email: String,

    /// Contact number as entered
    pub phone: String,

    /// Set once on insert
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// The four user-editable fields of this record.
    pub fn fields(&self) -> StudentFields {
        StudentFields {
            student_id: self.student_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Raw write payload as received from a client.
///
/// Any field may be absent or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub student_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl StudentInput {
    /// Build an input with every field present.
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            student_id: Some(student_id.into()),
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }
}

/// Sanitized mutable fields of a student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<StudentFields> for StudentInput {
    fn from(fields: StudentFields) -> Self {
        Self {
            student_id: Some(fields.student_id),
            name: Some(fields.name),
            email: Some(fields.email),
            phone: Some(fields.phone),
        }
    }
}

/// Names of the user-editable fields, used as keys of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    StudentId,
    Name,
    Email,
    Phone,
}

impl Field {
    /// All fields in validation order.
    pub const ALL: [Field; 4] = [Field::StudentId, Field::Name, Field::Email, Field::Phone];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::StudentId => "studentId",
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    /// Field with the given wire name.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
