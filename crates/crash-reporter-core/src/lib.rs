//! Crash Reporter Core — the crash record model and storage abstractions.
//!
//! This crate defines the types every other crate depends on: the
//! `CrashRecord` entity, its external identifier, the domain error taxonomy
//! and the `CrashStore` trait. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod crash;
pub mod error;
pub mod store;
