//! Quota rule and fixed quota windows.
//!
//! The rule itself is pure: given how many calls an identity has made in the
//! current window and its limit, may it make one more? Counting happens in
//! [`crate::domain::repositories::QuotaRepository`], which must apply this rule
//! and the increment as one atomic step.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Maximum number of calls an identity may make per quota window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaLimit {
    Unlimited,
    PerWindow(u32),
}

impl QuotaLimit {
    /// Converts a stored quota value. Negative values mean unlimited.
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            QuotaLimit::Unlimited
        } else {
            QuotaLimit::PerWindow(u32::try_from(raw).unwrap_or(u32::MAX))
        }
    }

    /// Returns true if one more call is allowed after `used` calls.
    pub fn permits(&self, used: u32) -> bool {
        match self {
            QuotaLimit::Unlimited => true,
            QuotaLimit::PerWindow(max) => used < *max,
        }
    }
}

/// Fixed-length quota period. Counters belong to the window they started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaWindow {
    seconds: i64,
}

impl QuotaWindow {
    /// Creates a window of `seconds` length; zero is clamped to one second.
    pub fn from_secs(seconds: u64) -> Self {
        Self {
            seconds: i64::try_from(seconds.max(1)).unwrap_or(i64::MAX),
        }
    }

    pub fn length(&self) -> TimeDelta {
        TimeDelta::seconds(self.seconds)
    }

    /// Start of the window containing `now`, aligned to the Unix epoch.
    pub fn start_of(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let ts = now.timestamp();
        let start = ts - ts.rem_euclid(self.seconds);
        DateTime::from_timestamp(start, 0).unwrap_or(now)
    }
}

/// Newest quota window a store has seen.
///
/// Stores use it to drop counters of past windows once per window instead of
/// on every call.
#[derive(Debug, Default)]
pub struct WindowSweep {
    latest: AtomicI64,
}

impl WindowSweep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true for exactly one caller per newer `window_start`.
    pub fn begins(&self, window_start: DateTime<Utc>) -> bool {
        let ts = window_start.timestamp();
        self.latest.fetch_max(ts, Ordering::AcqRel) < ts
    }
}
