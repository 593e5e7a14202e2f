//! Crash Reporter — HTTP API.
//!
//! Exposes crash ingestion, listing, lookup and deletion over HTTP. The
//! binary in `main.rs` wires a PostgreSQL store into the router built here.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

/// Builds the full application router.
///
/// CORS is permissive so the browser admin view can be served from any origin.
pub fn app(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::crashes::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
