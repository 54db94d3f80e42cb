//! In-memory click log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::ClickEvent;
use crate::domain::errors::StoreError;
use crate::domain::repositories::ClickRepository;

/// Append-only click log behind a [`RwLock`].
#[derive(Debug, Default)]
pub struct MemoryClickRepository {
    events: RwLock<Vec<ClickEvent>>,
}

impl MemoryClickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a click to the log.
    pub async fn append(&self, event: ClickEvent) {
        self.events.write().await.push(event);
    }
}

#[async_trait]
impl ClickRepository for MemoryClickRepository {
    async fn query(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        link_id: Option<i64>,
    ) -> Result<Vec<ClickEvent>, StoreError> {
        let events = self.events.read().await;

        let mut matching: Vec<ClickEvent> = events
            .iter()
            .filter(|e| from <= e.clicked_at && e.clicked_at <= to)
            .filter(|e| link_id.is_none_or(|id| e.link_id == id))
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.clicked_at);

        Ok(matching)
    }
}
