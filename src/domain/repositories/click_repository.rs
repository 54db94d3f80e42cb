//! Repository trait for the click log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::ClickEvent;
use crate::domain::errors::StoreError;

/// Read-only access to the append-only click log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryClickRepository`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Returns clicks with `from <= clicked_at <= to`, ordered by time.
    ///
    /// When `link_id` is set only clicks of that link are returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on read failure or timeout.
    async fn query(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        link_id: Option<i64>,
    ) -> Result<Vec<ClickEvent>, StoreError>;
}
