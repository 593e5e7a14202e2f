//! Query handlers for the crash report context.
//!
//! Stored records are never modified on the way out; handlers return
//! `CrashView` DTOs carrying the external id and a display timestamp.

use chrono::{DateTime, Utc};
use crash_reporter_core::crash::{CrashId, CrashRecord};
use crash_reporter_core::error::DomainError;
use crash_reporter_core::store::CrashStore;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::limit::ListLimit;

/// `strftime` pattern used for timestamps in responses.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Read-only view of a stored crash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrashView {
    /// External (hexadecimal) crash id. Serialized as `_id`, the key the
    /// admin view reads.
    #[serde(rename = "_id")]
    pub id: String,
    /// Client-side event correlation id.
    pub event_id: Option<Value>,
    /// Human-readable crash summary.
    pub message: Option<Value>,
    /// Raw stack trace text.
    pub stacktrace: Option<Value>,
    /// Whether the crash terminated the application, as sent.
    pub fatal: Value,
    /// Thread the crash happened on.
    pub thread: Option<Value>,
    /// Identifier of the reporting application.
    pub package: Option<Value>,
    /// Device description.
    pub device: Option<Value>,
    /// Android OS version.
    pub android_version: Option<Value>,
    /// The complete original payload.
    pub raw: Map<String, Value>,
    /// Creation time as `YYYY-MM-DD HH:MM:SS UTC`.
    pub timestamp: String,
}

impl From<CrashRecord> for CrashView {
    fn from(record: CrashRecord) -> Self {
        Self {
            id: record.id.to_string(),
            event_id: record.event_id,
            message: record.message,
            stacktrace: record.stacktrace,
            fatal: record.fatal,
            thread: record.thread,
            package: record.package,
            device: record.device,
            android_version: record.android_version,
            raw: record.raw,
            timestamp: format_timestamp(&record.timestamp),
        }
    }
}

/// Renders a creation timestamp for responses.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Lists the most recent crashes, newest first.
///
/// # Errors
///
/// Returns `DomainError::StorageUnavailable` if the store query fails.
pub async fn list_crashes(
    limit: ListLimit,
    store: &dyn CrashStore,
) -> Result<Vec<CrashView>, DomainError> {
    let records = store.list(limit.get()).await?;
    Ok(records.into_iter().map(CrashView::from).collect())
}

/// Retrieves a single crash by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no crash has the id.
/// Returns `DomainError::StorageUnavailable` if the store query fails.
pub async fn get_crash_by_id(
    crash_id: CrashId,
    store: &dyn CrashStore,
) -> Result<CrashView, DomainError> {
    store
        .find_by_id(crash_id)
        .await?
        .map(CrashView::from)
        .ok_or(DomainError::NotFound(crash_id))
}
