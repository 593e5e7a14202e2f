//! `PostgreSQL` implementation of the `CrashStore` trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};
use uuid::Uuid;

use crash_reporter_core::clock::Clock;
use crash_reporter_core::crash::{CrashId, CrashRecord, NewCrash};
use crash_reporter_core::error::DomainError;
use crash_reporter_core::store::CrashStore;

const SELECT_COLUMNS: &str = r"
SELECT id, event_id, message, stacktrace, fatal, thread, package, device,
       android_version, raw, created_at
FROM crashes";

/// PostgreSQL-backed crash store.
///
/// Ids and creation timestamps are assigned here, not by the database, so
/// the values returned from `insert` are known before the row is written.
#[derive(Clone)]
pub struct PgCrashStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for PgCrashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCrashStore")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl PgCrashStore {
    /// Creates a new `PgCrashStore`.
    #[must_use]
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

/// A `crashes` row. Payload values are JSON text, see the migration.
#[derive(Debug, FromRow)]
struct CrashRow {
    id: Uuid,
    event_id: Option<String>,
    message: Option<String>,
    stacktrace: Option<String>,
    fatal: String,
    thread: Option<String>,
    package: Option<String>,
    device: Option<String>,
    android_version: Option<String>,
    raw: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CrashRow> for CrashRecord {
    type Error = DomainError;

    fn try_from(row: CrashRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CrashId::from_uuid(row.id),
            event_id: decode_optional(row.event_id)?,
            message: decode_optional(row.message)?,
            stacktrace: decode_optional(row.stacktrace)?,
            fatal: decode(&row.fatal)?,
            thread: decode_optional(row.thread)?,
            package: decode_optional(row.package)?,
            device: decode_optional(row.device)?,
            android_version: decode_optional(row.android_version)?,
            raw: decode::<Map<String, Value>>(&row.raw)?,
            timestamp: row.created_at,
        })
    }
}

fn encode_optional(value: Option<&Value>) -> Option<String> {
    value.map(Value::to_string)
}

fn decode<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, DomainError> {
    serde_json::from_str(text)
        .map_err(|e| DomainError::StorageUnavailable(format!("corrupt stored value: {e}")))
}

fn decode_optional(text: Option<String>) -> Result<Option<Value>, DomainError> {
    text.as_deref().map(decode::<Value>).transpose()
}

#[allow(clippy::needless_pass_by_value)]
fn storage_error(err: sqlx::Error) -> DomainError {
    DomainError::StorageUnavailable(err.to_string())
}

#[async_trait]
impl CrashStore for PgCrashStore {
    #[instrument(skip(self, crash))]
    async fn insert(&self, crash: NewCrash) -> Result<CrashId, DomainError> {
        let id = CrashId::new();
        let created_at = self.clock.now_micros();

        sqlx::query(
            r"
            INSERT INTO crashes (
                id, event_id, message, stacktrace, fatal, thread, package,
                device, android_version, raw, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(id.as_uuid())
        .bind(encode_optional(crash.event_id.as_ref()))
        .bind(encode_optional(crash.message.as_ref()))
        .bind(encode_optional(crash.stacktrace.as_ref()))
        .bind(crash.fatal.to_string())
        .bind(encode_optional(crash.thread.as_ref()))
        .bind(encode_optional(crash.package.as_ref()))
        .bind(encode_optional(crash.device.as_ref()))
        .bind(encode_optional(crash.android_version.as_ref()))
        .bind(Value::Object(crash.raw).to_string())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        debug!(crash_id = %id, "crash inserted");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: u32) -> Result<Vec<CrashRecord>, DomainError> {
        let rows = sqlx::query_as::<_, CrashRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, seq DESC LIMIT $1"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(CrashRecord::try_from).collect()
    }

    #[instrument(skip(self), fields(crash_id = %id))]
    async fn find_by_id(&self, id: CrashId) -> Result<Option<CrashRecord>, DomainError> {
        let row = sqlx::query_as::<_, CrashRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.map(CrashRecord::try_from).transpose()
    }

    #[instrument(skip(self), fields(crash_id = %id))]
    async fn delete_by_id(&self, id: CrashId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM crashes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}
