//! Record store for student rows
//!
//! A single relational table with UNIQUE constraints on both natural keys.
//! Queries go through the [`StudentRepository`] trait; the SQLite store
//! hands out a repository view bound to one transaction at a time.

mod errors;
mod sqlite;

pub use errors::{StoreError, StoreResult};
pub use sqlite::{SqliteStudentStore, StudentTable, IN_MEMORY_PATH};

use chrono::{DateTime, Utc};

use crate::students::{Student, StudentFields, StudentKey};

/// Storage operations on the student table.
pub trait StudentRepository {
    /// All students, oldest first (ties broken by id)
    fn list_all(&self) -> StoreResult<Vec<Student>>;

    /// Find a student by surrogate key
    fn find_by_id(&self, id: StudentKey) -> StoreResult<Option<Student>>;

    /// Students holding `student_id` or `email`, optionally skipping one id
    fn find_by_natural_keys(
        &self,
        student_id: &str,
        email: &str,
        exclude: Option<StudentKey>,
    ) -> StoreResult<Vec<Student>>;

    /// Insert a new row and return it with its assigned id
    fn insert(&self, fields: &StudentFields, created_at: DateTime<Utc>) -> StoreResult<Student>;

    /// Overwrite the four mutable fields; `None` if the id is unknown
    fn update(&self, id: StudentKey, fields: &StudentFields) -> StoreResult<Option<Student>>;

    /// Remove a row; `false` if the id is unknown
    fn delete(&self, id: StudentKey) -> StoreResult<bool>;
}
