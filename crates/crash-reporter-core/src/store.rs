//! Crash store abstraction.

use async_trait::async_trait;

use crate::crash::{CrashId, CrashRecord, NewCrash};
use crate::error::DomainError;

/// Durable collection of crash records.
///
/// Every operation touches at most one record, except `list`, which reads.
/// Implementations report connection or query failures as
/// `DomainError::StorageUnavailable` and never retry internally.
#[async_trait]
pub trait CrashStore: Send + Sync {
    /// Persist a new crash, assigning its id and creation timestamp.
    async fn insert(&self, crash: NewCrash) -> Result<CrashId, DomainError>;

    /// Return up to `limit` crashes, most recent first. Crashes with equal
    /// timestamps are returned in reverse insertion order.
    ///
    /// `limit` is expected to be clamped by the caller.
    async fn list(&self, limit: u32) -> Result<Vec<CrashRecord>, DomainError>;

    /// Look up a single crash by id. `Ok(None)` means no crash has that id.
    async fn find_by_id(&self, id: CrashId) -> Result<Option<CrashRecord>, DomainError>;

    /// Remove the crash with the given id. Returns whether a crash was removed.
    async fn delete_by_id(&self, id: CrashId) -> Result<bool, DomainError>;
}
