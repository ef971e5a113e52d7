//! Student write pipeline
//!
//! Every write moves through the same states:
//!
//! ```text
//! received -> sanitized -> validated -> (rejected | conflict-checked)
//!          -> (rejected | persisted) -> responded
//! ```
//!
//! Validation failures never touch the store. The conflict check and the
//! write share one transaction, and a UNIQUE violation that still reaches
//! the table is reported as [`ServiceError::DuplicateKey`].

use std::fmt;
use std::sync::Arc;

use chrono::Utc;

use super::conflict::find_conflict;
use super::errors::{ServiceError, ServiceResult};
use super::model::{Student, StudentFields, StudentInput, StudentKey};
use super::sanitize::sanitize;
use super::search;
use super::validator::validate;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::store::{SqliteStudentStore, StudentRepository};

/// The operation a request performs, used for logging and failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Generic message reported when storage fails during this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch students",
            Operation::Fetch => "Failed to fetch student",
            Operation::Create => "Failed to create student",
            Operation::Update => "Failed to update student",
            Operation::Delete => "Failed to delete student",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry point for all student reads and writes.
pub struct StudentService {
    store: SqliteStudentStore,
    metrics: Arc<MetricsRegistry>,
}

impl StudentService {
    pub fn new(store: SqliteStudentStore, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Counters updated by this service.
    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// All students, oldest first, optionally narrowed by a search term.
    pub fn list(&self, search_term: Option<&str>) -> ServiceResult<Vec<Student>> {
        let result: ServiceResult<Vec<Student>> = self.store.read(|table| Ok(table.list_all()?));
        let students = self.settle(Operation::List, None, result)?;

        Ok(match search_term {
            Some(term) => search::filter(students, term),
            None => students,
        })
    }

    /// A single student by id.
    pub fn get(&self, id: StudentKey) -> ServiceResult<Student> {
        let result: ServiceResult<Student> = self
            .store
            .read(|table| table.find_by_id(id)?.ok_or(ServiceError::NotFound));
        self.settle(Operation::Fetch, Some(id), result)
    }

    /// Sanitize, validate, conflict-check and insert a new student.
    pub fn create(&self, input: &StudentInput) -> ServiceResult<Student> {
        let fields = self.admit(Operation::Create, None, input)?;

        let result: ServiceResult<Student> = self.store.write(|table| {
            if let Some(conflict) = find_conflict(table, &fields, None)? {
                return Err(ServiceError::Conflict(conflict));
            }
            Ok(table.insert(&fields, Utc::now())?)
        });
        let student = self.settle(Operation::Create, None, result)?;

        self.metrics.increment_created();
        log_record(Event::StudentCreated, &student);
        Ok(student)
    }

    /// Sanitize, validate, conflict-check (excluding `id` itself) and
    /// overwrite all four fields of an existing student.
    pub fn update(&self, id: StudentKey, input: &StudentInput) -> ServiceResult<Student> {
        let fields = self.admit(Operation::Update, Some(id), input)?;

        let result: ServiceResult<Student> = self.store.write(|table| {
            if table.find_by_id(id)?.is_none() {
                return Err(ServiceError::NotFound);
            }
            if let Some(conflict) = find_conflict(table, &fields, Some(id))? {
                return Err(ServiceError::Conflict(conflict));
            }
            table.update(id, &fields)?.ok_or(ServiceError::NotFound)
        });
        let student = self.settle(Operation::Update, Some(id), result)?;

        self.metrics.increment_updated();
        log_record(Event::StudentUpdated, &student);
        Ok(student)
    }

    /// Remove a student, returning the record as it was.
    pub fn delete(&self, id: StudentKey) -> ServiceResult<Student> {
        let result: ServiceResult<Student> = self.store.write(|table| {
            let existing = table.find_by_id(id)?.ok_or(ServiceError::NotFound)?;
            table.delete(id)?;
            Ok(existing)
        });
        let student = self.settle(Operation::Delete, Some(id), result)?;

        self.metrics.increment_deleted();
        log_record(Event::StudentDeleted, &student);
        Ok(student)
    }

    /// received -> sanitized -> validated
    fn admit(
        &self,
        op: Operation,
        id: Option<StudentKey>,
        input: &StudentInput,
    ) -> ServiceResult<StudentFields> {
        let fields = sanitize(input);
        let validation = validate(&fields);
        if validation.is_valid() {
            Ok(fields)
        } else {
            self.settle(op, id, Err(ServiceError::Validation(validation.into_errors())))
        }
    }

    /// Account for a rejected request before handing the result back.
    fn settle<T>(
        &self,
        op: Operation,
        id: Option<StudentKey>,
        result: ServiceResult<T>,
    ) -> ServiceResult<T> {
        let err = match result {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let id = id.map(|id| id.to_string()).unwrap_or_default();
        match &err {
            ServiceError::Validation(errors) => {
                self.metrics.increment_validation_rejections();
                let fields: Vec<&str> = errors.keys().map(|field| field.as_str()).collect();
                let fields = fields.join(",");
                log_event_with_fields(
                    Event::WriteRejected,
                    &[
                        ("fields", fields.as_str()),
                        ("id", id.as_str()),
                        ("operation", op.as_str()),
                        ("reason", "validation"),
                    ],
                );
            }
            ServiceError::Conflict(_) | ServiceError::DuplicateKey => {
                self.metrics.increment_conflict_rejections();
                let reason = err.to_string();
                log_event_with_fields(
                    Event::WriteRejected,
                    &[("id", id.as_str()), ("operation", op.as_str()), ("reason", reason.as_str())],
                );
            }
            ServiceError::NotFound => {
                self.metrics.increment_not_found();
            }
            ServiceError::Storage(source) => {
                self.metrics.increment_storage_failures();
                let detail = source.to_string();
                log_event_with_fields(
                    Event::StorageFailure,
                    &[("detail", detail.as_str()), ("id", id.as_str()), ("operation", op.as_str())],
                );
            }
        }
        Err(err)
    }
}

fn log_record(event: Event, student: &Student) {
    let id = student.id.to_string();
    log_event_with_fields(event, &[("id", id.as_str()), ("student_id", student.student_id.as_str())]);
}
