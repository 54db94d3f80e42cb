//! PostgreSQL implementation of the quota store.
//!
//! Uses the `api_quota_usage` table:
//!
//! | column         | type          |
//! |----------------|---------------|
//! | `subject`      | `TEXT`        |
//! | `window_start` | `TIMESTAMPTZ` |
//! | `call_count`   | `INTEGER`     |
//!
//! with a unique constraint on `(subject, window_start)`. Rows of past windows
//! are deleted once per new window by whichever process sees it first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::errors::StoreError;
use crate::domain::quota::WindowSweep;
use crate::domain::repositories::QuotaRepository;

/// PostgreSQL repository for per-window call counters.
///
/// Check and increment happen in one upsert statement. The conditional
/// `DO UPDATE ... WHERE` makes the row lock decide which of two concurrent
/// callers gets the last slot.
pub struct PgQuotaRepository {
    pool: Arc<PgPool>,
    sweep: WindowSweep,
}

impl PgQuotaRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            sweep: WindowSweep::new(),
        }
    }

    /// Deletes counters of windows before `window_start`.
    async fn purge_before(&self, window_start: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM api_quota_usage WHERE window_start < $1")
            .bind(window_start)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl QuotaRepository for PgQuotaRepository {
    async fn try_record(
        &self,
        subject: &str,
        window_start: DateTime<Utc>,
        max_calls: u32,
    ) -> Result<bool, StoreError> {
        // max_calls is at least 1 here; a fresh row starts at 1.
        let max_calls = i64::from(max_calls);

        let recorded: Option<i32> = sqlx::query_scalar(
            r#"
            INSERT INTO api_quota_usage (subject, window_start, call_count)
            VALUES ($1, $2, 1)
            ON CONFLICT (subject, window_start) DO UPDATE
            SET call_count = api_quota_usage.call_count + 1
            WHERE api_quota_usage.call_count < $3
            RETURNING call_count
            "#,
        )
        .bind(subject)
        .bind(window_start)
        .bind(max_calls)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if self.sweep.begins(window_start) {
            match self.purge_before(window_start).await {
                Ok(purged) => tracing::debug!(purged, "Expired quota counters deleted"),
                Err(e) => tracing::warn!(error = %e, "Failed to delete expired quota counters"),
            }
        }

        Ok(recorded.is_some())
    }
}
