//! Test stores — `CrashStore` implementations for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use crash_reporter_core::clock::Clock;
use crash_reporter_core::crash::{CrashId, CrashRecord, NewCrash};
use crash_reporter_core::error::DomainError;
use crash_reporter_core::store::CrashStore;

/// A crash store held entirely in memory.
///
/// Records are kept in insertion order; `list` sorts by timestamp
/// descending and breaks ties by reverse insertion order, matching the
/// PostgreSQL store.
pub struct InMemoryCrashStore {
    clock: Arc<dyn Clock>,
    records: Mutex<Vec<CrashRecord>>,
}

impl std::fmt::Debug for InMemoryCrashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCrashStore")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl InMemoryCrashStore {
    /// Create an empty store that stamps records with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Create an empty store whose clock is fixed at 2026-01-15 10:00:00 UTC.
    ///
    /// # Panics
    ///
    /// Never in practice; the fixed date is valid.
    #[must_use]
    pub fn with_fixed_clock() -> Self {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        Self::new(Arc::new(crate::FixedClock(now)))
    }

    /// Returns a snapshot of every stored record in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn records(&self) -> Vec<CrashRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl CrashStore for InMemoryCrashStore {
    async fn insert(&self, crash: NewCrash) -> Result<CrashId, DomainError> {
        let id = CrashId::new();
        let record = crash.into_record(id, self.clock.now_micros());
        self.records.lock().unwrap().push(record);
        Ok(id)
    }

    async fn list(&self, limit: u32) -> Result<Vec<CrashRecord>, DomainError> {
        let records = self.records.lock().unwrap();
        let mut listed: Vec<CrashRecord> = records.iter().rev().cloned().collect();
        // Stable sort keeps reverse insertion order among equal timestamps.
        listed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        listed.truncate(limit as usize);
        Ok(listed)
    }

    async fn find_by_id(&self, id: CrashId) -> Result<Option<CrashRecord>, DomainError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn delete_by_id(&self, id: CrashId) -> Result<bool, DomainError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}

/// A crash store that always returns a storage error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingCrashStore;

#[async_trait]
impl CrashStore for FailingCrashStore {
    async fn insert(&self, _crash: NewCrash) -> Result<CrashId, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn list(&self, _limit: u32) -> Result<Vec<CrashRecord>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_by_id(&self, _id: CrashId) -> Result<Option<CrashRecord>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn delete_by_id(&self, _id: CrashId) -> Result<bool, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }
}
