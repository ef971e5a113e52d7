//! Student records
//!
//! The data-integrity core of the registry:
//! - [`sanitize`]: trims input and lower-cases email
//! - [`validate`]: per-field rules, all fields checked independently
//! - [`find_conflict`]: natural-key collision check against the store
//! - [`StudentService`]: runs sanitize, validate, conflict check and write
//!   as one pipeline per request

mod conflict;
mod errors;
mod model;
mod sanitize;
pub mod search;
mod service;
mod validator;

pub use conflict::{classify, find_conflict, ConflictField};
pub use errors::{ServiceError, ServiceResult};
pub use model::{Field, Student, StudentFields, StudentInput, StudentKey};
pub use sanitize::sanitize;
pub use service::{Operation, StudentService};
pub use validator::{validate, FieldErrors, Validation};
