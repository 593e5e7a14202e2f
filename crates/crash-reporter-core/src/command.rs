//! Requests that change the set of stored crashes.

use uuid::Uuid;

/// A create or delete request, tagged for log correlation.
///
/// Handlers log `command_type` and `correlation_id` on every change so a
/// stored or deleted crash can be traced back to the request that caused it.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable `snake_case` name used as the `command` log field.
    fn command_type(&self) -> &'static str;

    /// Id minted per request at the HTTP boundary.
    fn correlation_id(&self) -> Uuid;
}
