//! In-memory link lookup.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::entities::LinkRef;
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkRepository;

/// Links keyed by ending.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, LinkRef>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, link: LinkRef) {
        self.links.insert(link.ending.clone(), link);
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn find_by_ending(&self, ending: &str) -> Result<Option<LinkRef>, StoreError> {
        Ok(self.links.get(ending).map(|l| l.value().clone()))
    }
}
