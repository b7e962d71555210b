//! Integration tests for routing, caller identification, and general
//! HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_as_user};

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let app = build_test_app();
    let response = get(app, "/health").await;

    // Health never fails the request; it reports the database state.
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app();
    let response = get(app, "/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Caller identification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_user_header_is_unauthorized() {
    let app = build_test_app();
    let response = get(app, "/api/v1/readiness/latest").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].as_str().unwrap().contains("x-user-id"));
}

#[tokio::test]
async fn non_numeric_user_header_is_unauthorized() {
    let app = build_test_app();
    let response = get_as_user(app, "/api/v1/readiness/latest", "abc").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn negative_user_header_is_unauthorized() {
    let app = build_test_app();
    let response = get_as_user(app, "/api/v1/roadmap/latest", "-4").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn validation_route_requires_mentor_header() {
    let app = build_test_app();
    // POST with a user header but no mentor header.
    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri("/api/v1/skills/1/validation")
        .header("x-user-id", "1")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"decision":"validated"}"#))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("x-mentor-id"));
}
