//! # Student Registry HTTP Server
//!
//! Axum server exposing the registry over JSON.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/students` - List (`?search=`) and create
//! - `/api/students/:id` - Fetch, update, delete
//! - `/observability/metrics` - Request counters

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod student_routes;

pub use config::HttpServerConfig;
pub use errors::{ErrorResponse, RestError, RestResult};
pub use server::HttpServer;
