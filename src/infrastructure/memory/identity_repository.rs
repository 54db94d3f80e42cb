//! In-memory account store.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::entities::IdentityRecord;
use crate::domain::errors::StoreError;
use crate::domain::repositories::IdentityRepository;

/// Accounts keyed by id.
#[derive(Debug, Default)]
pub struct MemoryIdentityRepository {
    records: DashMap<i64, IdentityRecord>,
}

impl MemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an account.
    pub fn insert(&self, record: IdentityRecord) {
        self.records.insert(record.id, record);
    }
}

#[async_trait]
impl IdentityRepository for MemoryIdentityRepository {
    async fn find_active_by_credential(
        &self,
        credential_hash: &str,
    ) -> Result<Option<IdentityRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .find(|r| {
                r.active && r.api_active && r.api_key_hash.as_deref() == Some(credential_hash)
            })
            .map(|r| r.value().clone()))
    }

    async fn find_by_id(
        &self,
        id: i64,
        include_inactive: bool,
    ) -> Result<Option<IdentityRecord>, StoreError> {
        Ok(self
            .records
            .get(&id)
            .filter(|r| include_inactive || r.active)
            .map(|r| r.value().clone()))
    }
}
