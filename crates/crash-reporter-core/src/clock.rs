//! Time source for crash creation timestamps.

use chrono::{DateTime, SubsecRound, Utc};

/// Source of creation timestamps for stored crash records.
///
/// Stores take the clock by injection so tests can pin or step time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time cut to whole microseconds, the finest
    /// precision a stored timestamp keeps.
    fn now_micros(&self) -> DateTime<Utc> {
        self.now().trunc_subsecs(6)
    }
}

/// Wall clock used by the running service.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
