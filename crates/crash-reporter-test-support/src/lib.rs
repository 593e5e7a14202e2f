//! Shared test fakes and utilities for the crash reporter.

mod clock;
mod store;

pub use clock::{FixedClock, SteppingClock};
pub use store::{FailingCrashStore, InMemoryCrashStore};
