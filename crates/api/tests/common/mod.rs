//! Shared helpers for HTTP-level router tests.
//!
//! These tests exercise the full middleware stack without a live
//! database: the pool is created lazily against an address nothing
//! listens on, so any handler that reaches for it observes a connection
//! error. Endpoints whose behaviour depends on real data are covered by
//! the unit tests in the core and engine modules.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use skillgauge_api::config::ServerConfig;
use skillgauge_api::engine::locks::CalculationLocks;
use skillgauge_api::router::build_app_router;
use skillgauge_api::state::AppState;
use skillgauge_events::{EventBus, NotificationTriggers};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, backed by
/// a lazy pool that cannot connect.
pub fn build_test_app() -> Router {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@127.0.0.1:9/skillgauge")
        .expect("lazy pool creation should succeed");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        triggers: NotificationTriggers::new(Arc::new(EventBus::default())),
        calc_locks: Arc::new(CalculationLocks::new()),
    };

    build_app_router(state, &config)
}

/// Send a GET request with no headers.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a GET request carrying an `x-user-id` header.
pub async fn get_as_user(app: Router, uri: &str, user_id: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("x-user-id", user_id)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
