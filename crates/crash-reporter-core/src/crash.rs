//! The crash record entity and its identifier.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Length of the external (hexadecimal) form of a `CrashId`.
pub const CRASH_ID_LEN: usize = 32;

/// Identifier of a stored crash, assigned by the store on insertion.
///
/// Externally a crash id is always 32 lowercase hexadecimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrashId(Uuid);

impl CrashId {
    /// Generates a fresh, time-ordered identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CrashId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CrashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Returned when a string is not a valid external crash identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed crash identifier: {input:?}")]
pub struct ParseCrashIdError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for CrashId {
    type Err = ParseCrashIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseCrashIdError {
            input: s.to_owned(),
        };
        if s.len() != CRASH_ID_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        Uuid::try_parse(s).map(Self).map_err(|_| malformed())
    }
}

impl Serialize for CrashId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CrashId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// A crash report that has not been stored yet.
///
/// The typed fields are extracted from `raw` by key. Their values are kept
/// exactly as the client sent them, so a non-string `message` stays a
/// non-string. `raw` is the complete original payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCrash {
    /// Client-side event correlation id.
    pub event_id: Option<Value>,
    /// Human-readable crash summary.
    pub message: Option<Value>,
    /// Raw stack trace text.
    pub stacktrace: Option<Value>,
    /// Whether the crash terminated the application. Normally a boolean,
    /// but kept as sent; `true` when the client omitted it.
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
}

impl NewCrash {
    /// Completes the record with the identity and timestamp assigned by a store.
    #[must_use]
    pub fn into_record(self, id: CrashId, timestamp: DateTime<Utc>) -> CrashRecord {
        CrashRecord {
            id,
            event_id: self.event_id,
            message: self.message,
            stacktrace: self.stacktrace,
            fatal: self.fatal,
            thread: self.thread,
            package: self.package,
            device: self.device,
            android_version: self.android_version,
            raw: self.raw,
            timestamp,
        }
    }
}

/// A stored crash report. Never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashRecord {
    /// Store-assigned identifier.
    pub id: CrashId,
    /// Client-side event correlation id.
    pub event_id: Option<Value>,
    /// Human-readable crash summary.
    pub message: Option<Value>,
    /// Raw stack trace text.
    pub stacktrace: Option<Value>,
    /// Whether the crash terminated the application. Normally a boolean,
    /// but kept as sent; `true` when the client omitted it.
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
    /// Creation time, assigned by the store.
    pub timestamp: DateTime<Utc>,
}
