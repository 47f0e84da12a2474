/// API integration tests
/// Tests complete HTTP request/response cycles through the real router
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{create_test_app, fixtures::*, InMemoryUserRepository};
use roster_core::{MockUserRepository, RosterError};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn app() -> Router {
    create_test_app(Arc::new(InMemoryUserRepository::new()))
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, body)
}

/// Create John and return his id
async fn create_john(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/v1/users",
            &json!({ "name": JOHN_NAME, "email": JOHN_EMAIL }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

/// Test creating a user returns the bare stored user
#[tokio::test]
async fn test_create_user() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/users",
            &json!({ "name": JOHN_NAME, "email": JOHN_EMAIL }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], JOHN_NAME);
    assert_eq!(body["email"], JOHN_EMAIL);
    assert!(body["created_at"].is_string());
    assert_eq!(body["created_at"], body["updated_at"]);
    assert!(body.get("data").is_none());
}

/// Test listing users wraps them in a data envelope
#[tokio::test]
async fn test_list_users() {
    let app = app();

    let (status, body) = send(&app, empty_request("GET", "/api/v1/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));

    let id = create_john(&app).await;

    let (status, body) = send(&app, empty_request("GET", "/api/v1/users")).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], id);
}

/// Test fetching a single user
#[tokio::test]
async fn test_get_user() {
    let app = app();
    let id = create_john(&app).await;

    let (status, body) = send(&app, empty_request("GET", &format!("/api/v1/users/{id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["name"], JOHN_NAME);
}

/// Test fetching a user that does not exist
#[tokio::test]
async fn test_get_user_not_found() {
    let app = app();

    let (status, body) = send(&app, empty_request("GET", "/api/v1/users/999999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user not found");
}

/// Test non-integer ids are rejected before any lookup
#[tokio::test]
async fn test_get_user_invalid_id() {
    let app = app();

    let (status, body) = send(&app, empty_request("GET", "/api/v1/users/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid id");
}

/// Test an undecodable id segment still gets a JSON error body
#[tokio::test]
async fn test_get_user_undecodable_id() {
    let app = app();

    let (status, body) = send(&app, empty_request("GET", "/api/v1/users/%FF")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

/// Test updating a user replaces name and email
#[tokio::test]
async fn test_update_user() {
    let app = app();
    let id = create_john(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/v1/users/{id}"),
            &json!({ "name": ALICE_NAME, "email": ALICE_EMAIL }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["name"], ALICE_NAME);
    assert_eq!(body["data"]["email"], ALICE_EMAIL);
}

/// Test updating with a short name and a malformed email
#[tokio::test]
async fn test_update_user_invalid_payload() {
    let app = app();
    let id = create_john(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/v1/users/{id}"),
            &json!({ "name": "a", "email": "x" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

/// Test updating a user that does not exist
#[tokio::test]
async fn test_update_user_not_found() {
    let app = app();

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/v1/users/999999",
            &json!({ "name": JOHN_NAME, "email": JOHN_EMAIL }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Test deleting a user, after which it is gone
#[tokio::test]
async fn test_delete_user() {
    let app = app();
    let id = create_john(&app).await;
    let uri = format!("/api/v1/users/{id}");

    let (status, body) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Test deleting a user that does not exist
#[tokio::test]
async fn test_delete_user_not_found() {
    let app = app();

    let (status, _) = send(&app, empty_request("DELETE", "/api/v1/users/999999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Test missing fields are reported by binding
#[tokio::test]
async fn test_create_user_missing_fields() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request("POST", "/api/v1/users", &json!({ "email": JOHN_EMAIL })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name is required");
}

/// Test an upper-case email passes binding but fails the domain rules
#[tokio::test]
async fn test_create_user_uppercase_email() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/users",
            &json!({ "name": JOHN_NAME, "email": "John@Doe.COM" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid email format");
}

/// Test invalid JSON request
#[tokio::test]
async fn test_invalid_json_request() {
    let app = app();

    let request = Request::builder()
        .uri("/api/v1/users")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{invalid json"))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

/// Test storage failures are reported without leaking their detail
#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_find_all()
        .returning(|| Err(RosterError::storage("password authentication failed")));
    let app = create_test_app(Arc::new(repository));

    let (status, body) = send(&app, empty_request("GET", "/api/v1/users")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

/// Test a panicking handler is answered with a JSON 500
#[tokio::test]
async fn test_handler_panic_is_internal_error() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_find_all()
        .returning(|| panic!("repository exploded"));
    let app = create_test_app(Arc::new(repository));

    let (status, body) = send(&app, empty_request("GET", "/api/v1/users")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}
