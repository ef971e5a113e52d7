//! student-registry - A small, strict student-records service
//!
//! Every write is sanitized, validated field by field, and checked for
//! natural-key conflicts before it reaches the SQLite store.

pub mod cli;
pub mod form;
pub mod http_server;
pub mod observability;
pub mod store;
pub mod students;
