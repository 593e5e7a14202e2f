//! Shared application state.

use std::sync::Arc;

use crash_reporter_core::store::CrashStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The crash store every handler reads from and writes to.
    pub store: Arc<dyn CrashStore>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(store: Arc<dyn CrashStore>) -> Self {
        Self { store }
    }
}
