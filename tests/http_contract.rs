//! HTTP Contract Tests
//!
//! Drives the axum router directly (no socket) and checks status codes
//! and JSON bodies for every student endpoint.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use student_registry::http_server::{HttpServer, HttpServerConfig};
use student_registry::observability::MetricsRegistry;
use student_registry::store::SqliteStudentStore;
use student_registry::students::StudentService;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn app() -> Router {
    let store = SqliteStudentStore::open_in_memory().unwrap();
    let service = Arc::new(StudentService::new(store, Arc::new(MetricsRegistry::new())));
    HttpServer::with_config(HttpServerConfig::default(), service).router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn student(student_id: &str, email: &str) -> String {
    json!({
        "studentId": student_id,
        "name": "Jane Doe",
        "email": email,
        "phone": "555-010-0100"
    })
    .to_string()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_201_with_sanitized_record() {
    let app = app();
    let body = json!({
        "studentId": " STU001 ",
        "name": " Jane Doe ",
        "email": " Jane@Example.COM ",
        "phone": "555-010-0100"
    })
    .to_string();

    let (status, created) = send(&app, Method::POST, "/api/students", Some(&body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["studentId"], "STU001");
    assert_eq!(created["name"], "Jane Doe");
    assert_eq!(created["email"], "jane@example.com");
    assert!(created["id"].is_i64());
    assert!(created["createdAt"].is_string());
}

#[tokio::test]
async fn test_validation_failure_lists_fields() {
    let app = app();
    let body = json!({"studentId": "ab", "name": "Jane Doe", "email": "a@b", "phone": null}).to_string();

    let (status, error) = send(&app, Method::POST, "/api/students", Some(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Validation failed");
    assert_eq!(
        error["validationErrors"],
        json!({
            "studentId": "Student ID must be at least 3 characters",
            "email": "Please enter a valid email address",
            "phone": "Phone number is required"
        })
    );
}

#[tokio::test]
async fn test_conflict_names_student_id() {
    let app = app();
    send(&app, Method::POST, "/api/students", Some(&student("STU001", "a@b.com"))).await;

    let (status, error) =
        send(&app, Method::POST, "/api/students", Some(&student("STU001", "c@d.com"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({"error": "Student ID already exists"}));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = app();

    for body in ["{not json", r#"{"studentId": 42}"#, r#""just text""#] {
        let (status, error) = send(&app, Method::POST, "/api/students", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(error, json!({"error": "Invalid request body"}));
    }
}

/// Clients that omit the content type still get their JSON read.
#[tokio::test]
async fn test_body_without_content_type() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/students")
        .body(Body::from(student("STU001", "a@b.com")))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (_, all) = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_list_is_oldest_first_and_searchable() {
    let app = app();
    send(&app, Method::POST, "/api/students", Some(&student("STU001", "ann@b.com"))).await;
    send(&app, Method::POST, "/api/students", Some(&student("STU002", "bob@b.com"))).await;

    let (status, all) = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["studentId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["STU001", "STU002"]);

    let (_, found) = send(&app, Method::GET, "/api/students?search=BOB", None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["studentId"], "STU002");
}

#[tokio::test]
async fn test_unreadable_query_is_json_error() {
    let app = app();

    let (status, error) = send(&app, Method::GET, "/api/students?search=a&search=b", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({"error": "Invalid query string"}));
}

#[tokio::test]
async fn test_get_unknown_and_non_numeric_ids() {
    let app = app();

    for uri in ["/api/students/999", "/api/students/abc"] {
        let (status, error) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(error, json!({"error": "Student not found"}));
    }
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn test_update_with_own_keys() {
    let app = app();
    let (_, created) =
        send(&app, Method::POST, "/api/students", Some(&student("STU001", "a@b.com"))).await;
    let uri = format!("/api/students/{}", created["id"]);

    let body = json!({
        "studentId": "STU001",
        "name": "Janet Doe",
        "email": "a@b.com",
        "phone": "555-010-0100"
    })
    .to_string();
    let (status, updated) = send(&app, Method::PUT, &uri, Some(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Janet Doe");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_unknown_id() {
    let app = app();
    let (status, error) =
        send(&app, Method::PUT, "/api/students/7", Some(&student("STU001", "a@b.com"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Student not found");
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = app();
    let (_, created) =
        send(&app, Method::POST, "/api/students", Some(&student("STU001", "a@b.com"))).await;
    let uri = format!("/api/students/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student deleted successfully"}));

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Observability
// =============================================================================

#[tokio::test]
async fn test_health_and_metrics() {
    let app = app();
    send(&app, Method::POST, "/api/students", Some(&student("STU001", "a@b.com"))).await;
    send(&app, Method::POST, "/api/students", Some(&student("STU001", "c@d.com"))).await;

    let (status, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    let (status, metrics) = send(&app, Method::GET, "/observability/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["students_created"], 1);
    assert_eq!(metrics["conflict_rejections"], 1);
}
