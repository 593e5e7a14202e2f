//! Command handlers for the crash report context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: build or locate a crash, then persist the change.

use crash_reporter_core::command::Command;
use crash_reporter_core::crash::CrashId;
use crash_reporter_core::error::DomainError;
use crash_reporter_core::store::CrashStore;
use serde_json::Value;
use tracing::info;

use crate::domain::commands::{DeleteCrash, ReportCrash};
use crate::domain::report::extract_new_crash;

/// Result of a successfully stored crash report.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashReceipt {
    /// The id assigned by the store.
    pub crash_id: CrashId,
    /// The client's `event_id`, if it sent one.
    pub event_id: Option<Value>,
}

/// Handles the `ReportCrash` command: extracts a crash record from the
/// payload and persists it. Duplicate reports are stored again.
///
/// # Errors
///
/// Returns `DomainError::StorageUnavailable` if the insert fails.
pub async fn handle_report_crash(
    command: &ReportCrash,
    store: &dyn CrashStore,
) -> Result<CrashReceipt, DomainError> {
    let crash = extract_new_crash(command.payload.clone());
    let event_id = crash.event_id.clone();

    let crash_id = store.insert(crash).await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        crash_id = %crash_id,
        "crash stored"
    );

    Ok(CrashReceipt { crash_id, event_id })
}

/// Handles the `DeleteCrash` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no crash has the given id.
/// Returns `DomainError::StorageUnavailable` if the delete fails.
pub async fn handle_delete_crash(
    command: &DeleteCrash,
    store: &dyn CrashStore,
) -> Result<(), DomainError> {
    if !store.delete_by_id(command.crash_id).await? {
        return Err(DomainError::NotFound(command.crash_id));
    }

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        crash_id = %command.crash_id,
        "crash deleted"
    );

    Ok(())
}
