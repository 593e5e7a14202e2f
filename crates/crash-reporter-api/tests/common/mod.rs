//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use crash_reporter_core::store::CrashStore;
use crash_reporter_test_support::{InMemoryCrashStore, SteppingClock};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crash_reporter_api::state::AppState;

/// Build an in-memory store whose clock starts at 2024-01-02 03:04:05 UTC and
/// advances one second per insert.
pub fn test_store() -> Arc<InMemoryCrashStore> {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    Arc::new(InMemoryCrashStore::new(Arc::new(SteppingClock::new(
        start,
        Duration::seconds(1),
    ))))
}

/// Build the full app router over `store`. Uses the same router as `main.rs`.
pub fn build_test_app(store: Arc<dyn CrashStore>) -> Router {
    crash_reporter_api::app(AppState::new(store))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(app, uri, serde_json::to_vec(body).unwrap()).await
}

/// Send a POST request with arbitrary body bytes and return the response.
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: impl Into<Body>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
