//! Per-identity call quota.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::errors::StoreError;
use crate::domain::quota::{QuotaLimit, QuotaWindow};
use crate::domain::repositories::QuotaRepository;

/// Checks and records calls against an identity's quota.
///
/// Counters live in fixed windows ([`QuotaWindow`]). A new window starts
/// from zero, which is how usage resets over time.
pub struct QuotaPolicy<Q: QuotaRepository + ?Sized> {
    repository: Arc<Q>,
    window: QuotaWindow,
}

impl<Q: QuotaRepository + ?Sized> QuotaPolicy<Q> {
    pub fn new(repository: Arc<Q>, window: QuotaWindow) -> Self {
        Self { repository, window }
    }

    /// Records one call for `subject` if `limit` allows it.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the call is allowed and has been counted
    /// - `Ok(false)` if the limit is reached; nothing is counted
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the counter store fails.
    pub async fn check_and_record(&self, subject: &str, limit: QuotaLimit) -> Result<bool, StoreError> {
        self.check_and_record_at(subject, limit, Utc::now()).await
    }

    /// Same as [`QuotaPolicy::check_and_record`] with an explicit clock.
    pub async fn check_and_record_at(
        &self,
        subject: &str,
        limit: QuotaLimit,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        match limit {
            QuotaLimit::Unlimited => Ok(true),
            QuotaLimit::PerWindow(0) => Ok(false),
            QuotaLimit::PerWindow(max) => {
                self.repository
                    .try_record(subject, self.window.start_of(now), max)
                    .await
            }
        }
    }
}
