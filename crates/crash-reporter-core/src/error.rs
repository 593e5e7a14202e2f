//! Domain error types.

use thiserror::Error;

use crate::crash::{CrashId, ParseCrashIdError};

/// Top-level domain error type.
///
/// Malformed identifiers, missing records and storage failures are distinct
/// outcomes and are never folded into one another.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An external identifier could not be parsed into a `CrashId`.
    #[error("malformed crash identifier: {0:?}")]
    MalformedIdentifier(String),

    /// A well-formed identifier matched no stored crash.
    #[error("crash not found: {0}")]
    NotFound(CrashId),

    /// The backing store could not be reached or failed the operation.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<ParseCrashIdError> for DomainError {
    fn from(err: ParseCrashIdError) -> Self {
        Self::MalformedIdentifier(err.input)
    }
}
