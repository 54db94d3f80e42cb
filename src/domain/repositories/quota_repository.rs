//! Repository trait for per-identity call counters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::StoreError;

/// Per-window call counters keyed by identity subject.
///
/// # Atomicity
///
/// [`QuotaRepository::try_record`] must check and increment in one atomic step
/// per subject. Two concurrent calls at `max_calls - 1` must not both succeed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgQuotaRepository`] - single upsert statement
/// - [`crate::infrastructure::memory::MemoryQuotaRepository`] - `DashMap` entry lock
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuotaRepository: Send + Sync {
    /// Records one call for `subject` in the window starting at `window_start`,
    /// unless the count for that window already reached `max_calls`.
    ///
    /// Counters of earlier windows no longer apply once a new window starts.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the call was recorded
    /// - `Ok(false)` if the limit was reached; the counter is left unchanged
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be updated.
    async fn try_record(
        &self,
        subject: &str,
        window_start: DateTime<Utc>,
        max_calls: u32,
    ) -> Result<bool, StoreError>;
}
