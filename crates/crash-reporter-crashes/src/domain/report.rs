//! Extraction of crash records from client payloads.
//!
//! Clients send free-form JSON. A handful of keys are lifted into typed
//! fields; the whole payload is kept verbatim in `raw` so fields the server
//! does not know about survive.

use crash_reporter_core::crash::NewCrash;
use serde_json::{Map, Value};

/// Parses a request body into a payload mapping.
///
/// An empty body, invalid JSON, or JSON that is not an object all yield the
/// empty mapping. Reports are accepted leniently; nothing here fails.
#[must_use]
pub fn parse_payload(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Builds an unsaved crash from a payload.
///
/// Typed fields take the payload's value unchanged, whatever its JSON type;
/// a JSON `null` counts as absent. An absent `fatal` becomes `true`.
#[must_use]
pub fn extract_new_crash(payload: Map<String, Value>) -> NewCrash {
    let field = |key: &str| payload.get(key).filter(|v| !v.is_null()).cloned();

    NewCrash {
        event_id: field("event_id"),
        message: field("message"),
        stacktrace: field("stacktrace"),
        fatal: field("fatal").unwrap_or(Value::Bool(true)),
        thread: field("thread"),
        package: field("package"),
        device: field("device"),
        android_version: field("android_version"),
        raw: payload,
    }
}
