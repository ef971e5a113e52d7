//! Natural-key conflict check
//!
//! Runs before every insert and update. Reports which natural key collided,
//! with `studentId` taking precedence over `email` when both do.
//! The table's UNIQUE constraints remain the final authority.

use std::fmt;

use super::model::{Field, Student, StudentFields, StudentKey};
use crate::store::{StoreResult, StudentRepository};

/// The natural key another record already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    StudentId,
    Email,
}

impl ConflictField {
    /// User-facing rejection message.
    pub fn message(&self) -> &'static str {
        match self {
            ConflictField::StudentId => "Student ID already exists",
            ConflictField::Email => "Email address already exists",
        }
    }

    /// The record field that collided.
    pub fn field(&self) -> Field {
        match self {
            ConflictField::StudentId => Field::StudentId,
            ConflictField::Email => Field::Email,
        }
    }
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Look up records sharing the candidate's natural keys.
///
/// `exclude` skips the record being updated so it may keep its own keys.
pub fn find_conflict<R>(
    repo: &R,
    candidate: &StudentFields,
    exclude: Option<StudentKey>,
) -> StoreResult<Option<ConflictField>>
where
    R: StudentRepository + ?Sized,
{
    let holders = repo.find_by_natural_keys(&candidate.student_id, &candidate.email, exclude)?;
    Ok(classify(candidate, &holders))
}

/// Decide which key collided among the records returned by a lookup.
pub fn classify(candidate: &StudentFields, holders: &[Student]) -> Option<ConflictField> {
    if holders.iter().any(|s| s.student_id == candidate.student_id) {
        Some(ConflictField::StudentId)
    } else if holders.iter().any(|s| s.email == candidate.email) {
        Some(ConflictField::Email)
    } else {
        None
    }
}
