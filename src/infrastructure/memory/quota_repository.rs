//! In-memory quota counters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::errors::StoreError;
use crate::domain::quota::{QuotaLimit, WindowSweep};
use crate::domain::repositories::QuotaRepository;

#[derive(Debug, Clone, Copy)]
struct WindowCount {
    window_start: DateTime<Utc>,
    calls: u32,
}

/// Quota counters held in a [`DashMap`], one entry per subject.
///
/// The entry guard is held across check and increment, so concurrent calls
/// for one subject are serialized while other subjects proceed in parallel.
/// Only the current window is kept per subject, and subjects idle since an
/// earlier window are dropped when a new window begins.
#[derive(Debug, Default)]
pub struct MemoryQuotaRepository {
    counters: DashMap<String, WindowCount>,
    sweep: WindowSweep,
}

impl MemoryQuotaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded for `subject` in the window starting at `window_start`.
    pub fn usage(&self, subject: &str, window_start: DateTime<Utc>) -> u32 {
        self.counters
            .get(subject)
            .filter(|c| c.window_start == window_start)
            .map(|c| c.calls)
            .unwrap_or(0)
    }

    /// Number of subjects with a live counter.
    pub fn tracked_subjects(&self) -> usize {
        self.counters.len()
    }
}

#[async_trait]
impl QuotaRepository for MemoryQuotaRepository {
    async fn try_record(
        &self,
        subject: &str,
        window_start: DateTime<Utc>,
        max_calls: u32,
    ) -> Result<bool, StoreError> {
        // Before taking the entry guard: retain locks every shard.
        if self.sweep.begins(window_start) {
            self.counters.retain(|_, c| c.window_start >= window_start);
        }

        let mut entry = self
            .counters
            .entry(subject.to_string())
            .or_insert(WindowCount {
                window_start,
                calls: 0,
            });

        if entry.window_start != window_start {
            entry.window_start = window_start;
            entry.calls = 0;
        }

        if !QuotaLimit::PerWindow(max_calls).permits(entry.calls) {
            return Ok(false);
        }

        entry.calls += 1;
        Ok(true)
    }
}
