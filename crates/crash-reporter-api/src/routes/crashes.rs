//! Routes for crash ingestion, listing, lookup and deletion.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use crash_reporter_core::crash::CrashId;
use crash_reporter_core::error::DomainError;
use crash_reporter_crashes::application::query_handlers::{self, CrashView};
use crash_reporter_crashes::application::command_handlers;
use crash_reporter_crashes::domain::commands;
use crash_reporter_crashes::domain::limit::ListLimit;
use crash_reporter_crashes::domain::report;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of GET /crashes as ordered pairs, so a repeated `limit`
/// does not fail extraction.
type QueryPairs = Vec<(String, String)>;

/// Picks the page size from the query string. The first `limit` wins; a
/// query string that cannot be decoded at all yields the default.
fn limit_from_query(query: Result<Query<QueryPairs>, QueryRejection>) -> ListLimit {
    match query {
        Ok(Query(pairs)) => ListLimit::from_param(
            pairs
                .iter()
                .find(|(key, _)| key == "limit")
                .map(|(_, value)| value.as_str()),
        ),
        Err(_) => ListLimit::default(),
    }
}

/// Response body for POST /crashes.
#[derive(Debug, Serialize)]
pub struct CreateCrashResponse {
    /// Always `"saved"`.
    pub status: &'static str,
    /// The id assigned to the new crash.
    pub id: CrashId,
    /// The client's `event_id`, or null.
    pub event_id: Option<Value>,
}

/// Response body for DELETE /crashes/{crash_id}.
#[derive(Debug, Serialize)]
pub struct DeleteCrashResponse {
    /// Always `"deleted"`.
    pub status: &'static str,
}

fn parse_crash_id(raw: &str) -> Result<CrashId, ApiError> {
    raw.parse::<CrashId>()
        .map_err(|e| ApiError(DomainError::from(e)))
}

/// POST /crashes
///
/// The body is read raw: anything that is not a JSON object is stored as an
/// empty report rather than rejected.
#[instrument(skip(state, body), fields(body_len = body.len()))]
async fn create_crash(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateCrashResponse>), ApiError> {
    let command = commands::ReportCrash {
        correlation_id: Uuid::new_v4(),
        payload: report::parse_payload(&body),
    };

    info!(correlation_id = %command.correlation_id, "handling report_crash command");

    let receipt = command_handlers::handle_report_crash(&command, &*state.store).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCrashResponse {
            status: "saved",
            id: receipt.crash_id,
            event_id: receipt.event_id,
        }),
    ))
}

/// GET /crashes
#[instrument(skip(state, query), fields(limit))]
async fn list_crashes(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<CrashView>>, ApiError> {
    let limit = limit_from_query(query);
    tracing::Span::current().record("limit", limit.get());
    let views = query_handlers::list_crashes(limit, &*state.store).await?;
    Ok(Json(views))
}

/// GET /crashes/{crash_id}
#[instrument(skip(state))]
async fn get_crash(
    State(state): State<AppState>,
    Path(crash_id): Path<String>,
) -> Result<Json<CrashView>, ApiError> {
    let crash_id = parse_crash_id(&crash_id)?;
    let view = query_handlers::get_crash_by_id(crash_id, &*state.store).await?;
    Ok(Json(view))
}

/// DELETE /crashes/{crash_id}
#[instrument(skip(state))]
async fn delete_crash(
    State(state): State<AppState>,
    Path(crash_id): Path<String>,
) -> Result<Json<DeleteCrashResponse>, ApiError> {
    let command = commands::DeleteCrash {
        correlation_id: Uuid::new_v4(),
        crash_id: parse_crash_id(&crash_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_crash command");

    command_handlers::handle_delete_crash(&command, &*state.store).await?;

    Ok(Json(DeleteCrashResponse { status: "deleted" }))
}

/// Returns the router for the crash endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/crashes", get(list_crashes).post(create_crash))
        .route("/crashes/{crash_id}", get(get_crash).delete(delete_crash))
}
