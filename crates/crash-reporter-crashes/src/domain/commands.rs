//! Commands for the crash report context.

use crash_reporter_core::command::Command;
use crash_reporter_core::crash::CrashId;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Command to store a crash report sent by a client.
#[derive(Debug, Clone)]
pub struct ReportCrash {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The client payload, already normalized to a JSON object.
    pub payload: Map<String, Value>,
}

impl Command for ReportCrash {
    fn command_type(&self) -> &'static str {
        "crashes.report_crash"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a stored crash.
#[derive(Debug, Clone)]
pub struct DeleteCrash {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The crash to delete.
    pub crash_id: CrashId,
}

impl Command for DeleteCrash {
    fn command_type(&self) -> &'static str {
        "crashes.delete_crash"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
