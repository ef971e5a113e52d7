//! Student HTTP Routes
//!
//! CRUD endpoints over the student registry. Handlers only translate HTTP
//! into service calls; sanitizing, validation and conflict checks live in
//! [`StudentService`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::errors::{RestError, RestResult};
use crate::students::{Operation, ServiceResult, Student, StudentInput, StudentKey, StudentService};

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Student Routes
// ==================

/// Create student routes
pub fn student_routes(service: Arc<StudentService>) -> Router {
    Router::new()
        .route("/students", get(list_students_handler).post(create_student_handler))
        .route(
            "/students/:id",
            get(get_student_handler)
                .put(update_student_handler)
                .delete(delete_student_handler),
        )
        .with_state(service)
}

// ==================
// Helper Functions
// ==================

/// Ids are positive integers; anything else cannot name a record.
fn parse_id(raw: &str) -> RestResult<StudentKey> {
    raw.parse::<StudentKey>().map_err(|_| RestError::NotFound)
}

/// Bodies are parsed as JSON whatever the declared content type.
fn parse_body(body: &[u8]) -> RestResult<StudentInput> {
    serde_json::from_slice(body).map_err(|_| RestError::InvalidBody)
}

fn parse_query(query: Result<Query<ListQuery>, QueryRejection>) -> RestResult<ListQuery> {
    query
        .map(|Query(query)| query)
        .map_err(|_| RestError::InvalidQuery)
}

/// Run a service call on the blocking pool; SQLite calls block.
async fn run_blocking<T, F>(service: Arc<StudentService>, op: Operation, f: F) -> RestResult<T>
where
    T: Send + 'static,
    F: FnOnce(&StudentService) -> ServiceResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|_| RestError::Internal(op))?
        .map_err(|err| RestError::from_service(err, op))
}

// ==================
// Handlers
// ==================

async fn list_students_handler(
    State(service): State<Arc<StudentService>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> RestResult<Json<Vec<Student>>> {
    let query = parse_query(query)?;
    let students = run_blocking(service, Operation::List, move |service| {
        service.list(query.search.as_deref())
    })
    .await?;
    Ok(Json(students))
}

async fn get_student_handler(
    State(service): State<Arc<StudentService>>,
    Path(id): Path<String>,
) -> RestResult<Json<Student>> {
    let id = parse_id(&id)?;
    let student = run_blocking(service, Operation::Fetch, move |service| service.get(id)).await?;
    Ok(Json(student))
}

async fn create_student_handler(
    State(service): State<Arc<StudentService>>,
    body: Bytes,
) -> RestResult<(StatusCode, Json<Student>)> {
    let input = parse_body(&body)?;
    let student =
        run_blocking(service, Operation::Create, move |service| service.create(&input)).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn update_student_handler(
    State(service): State<Arc<StudentService>>,
    Path(id): Path<String>,
    body: Bytes,
) -> RestResult<Json<Student>> {
    let id = parse_id(&id)?;
    let input = parse_body(&body)?;
    let student =
        run_blocking(service, Operation::Update, move |service| service.update(id, &input)).await?;
    Ok(Json(student))
}

async fn delete_student_handler(
    State(service): State<Arc<StudentService>>,
    Path(id): Path<String>,
) -> RestResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    run_blocking(service, Operation::Delete, move |service| service.delete(id)).await?;
    Ok(Json(MessageResponse {
        message: "Student deleted successfully".to_string(),
    }))
}
