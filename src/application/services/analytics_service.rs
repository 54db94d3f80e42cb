//! Click analytics over validated time windows.

use std::sync::Arc;

use crate::domain::aggregation::{AggregationRequest, AggregationResult, aggregate};
use crate::domain::errors::{StoreError, WindowError};
use crate::domain::repositories::ClickRepository;
use crate::domain::stats_window::{StatsScope, StatsWindow};

/// Runs day, country and referrer aggregations over the click log.
///
/// One store read per call. Grouping happens in
/// [`crate::domain::aggregation::aggregate`], never in storage-specific SQL.
pub struct AnalyticsService<C: ClickRepository + ?Sized> {
    repository: Arc<C>,
    max_days: u32,
}

impl<C: ClickRepository + ?Sized> AnalyticsService<C> {
    /// Creates a service allowing windows of at most `max_days` whole days.
    pub fn new(repository: Arc<C>, max_days: u32) -> Self {
        Self {
            repository,
            max_days,
        }
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    /// Builds a [`StatsWindow`] with the configured day-span limit.
    ///
    /// # Errors
    ///
    /// Returns the [`WindowError`] describing why the bounds were rejected.
    pub fn window(
        &self,
        scope: StatsScope,
        left_bound: &str,
        right_bound: &str,
    ) -> Result<StatsWindow, WindowError> {
        StatsWindow::new(scope, left_bound, right_bound, self.max_days)
    }

    /// Computes the requested aggregation.
    ///
    /// A window without clicks yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the click log cannot be read.
    pub async fn run(&self, request: AggregationRequest) -> Result<AggregationResult, StoreError> {
        let window = request.window;
        let events = self
            .repository
            .query(
                window.left_bound(),
                window.right_bound(),
                window.scope().link_id(),
            )
            .await?;

        Ok(aggregate(&request, &events))
    }
}
