//! Crash Reporter — crash report context.
//!
//! Responsible for turning inbound reports into stored crash records,
//! listing and fetching them with their rendered external form, and
//! deleting them by id.

pub mod application;
pub mod domain;
