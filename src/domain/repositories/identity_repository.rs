//! Repository trait for stored accounts.

use async_trait::async_trait;

use crate::domain::entities::IdentityRecord;
use crate::domain::errors::StoreError;

/// Read access to stored accounts.
///
/// Credentials are never stored in clear: lookups take the HMAC of the raw
/// key, computed by [`crate::utils::api_key::hash_api_key`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgIdentityRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryIdentityRepository`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Finds the account owning `credential_hash`.
    ///
    /// Only returns a record that is active, has API access enabled and whose
    /// stored hash equals `credential_hash`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be read.
    async fn find_active_by_credential(
        &self,
        credential_hash: &str,
    ) -> Result<Option<IdentityRecord>, StoreError>;

    /// Finds an account by id.
    ///
    /// Inactive accounts are returned only when `include_inactive` is true.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be read.
    async fn find_by_id(
        &self,
        id: i64,
        include_inactive: bool,
    ) -> Result<Option<IdentityRecord>, StoreError>;
}
