//! Repository trait for link lookup.

use async_trait::async_trait;

use crate::domain::entities::LinkRef;
use crate::domain::errors::StoreError;

/// Resolves short link endings to their id and creator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its short ending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be read.
    async fn find_by_ending(&self, ending: &str) -> Result<Option<LinkRef>, StoreError>;
}
