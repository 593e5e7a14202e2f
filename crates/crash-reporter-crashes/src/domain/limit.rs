//! Page size policy for crash listings.

use std::num::IntErrorKind;

/// A listing page size clamped into `[ListLimit::MIN, ListLimit::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimit(u32);

impl ListLimit {
    /// Smallest page size.
    pub const MIN: u32 = 1;
    /// Largest page size.
    pub const MAX: u32 = 200;
    /// Page size used when the request gives none, or gives a non-number.
    pub const DEFAULT: u32 = 50;

    /// Clamps an arbitrary integer into the allowed range.
    #[must_use]
    pub fn clamped(requested: i64) -> Self {
        let clamped = requested.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // In range by construction.
        Self(u32::try_from(clamped).unwrap_or(Self::DEFAULT))
    }

    /// Interprets the raw `limit` query parameter.
    ///
    /// Integers too large or too small for `i64` saturate like any other
    /// out-of-range value.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        let Some(raw) = param else {
            return Self::default();
        };
        match raw.trim().parse::<i64>() {
            Ok(n) => Self::clamped(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Self(Self::MAX),
                IntErrorKind::NegOverflow => Self(Self::MIN),
                _ => Self::default(),
            },
        }
    }

    /// Returns the page size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
