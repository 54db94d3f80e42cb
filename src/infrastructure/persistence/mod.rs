//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain store traits using SQLx runtime
//! queries bound with `$n` parameters.
//!
//! # Repositories
//!
//! - [`PgIdentityRepository`] - Account lookup by key hash or id
//! - [`PgQuotaRepository`] - Atomic per-window call counters
//! - [`PgClickRepository`] - Click range queries
//! - [`PgLinkRepository`] - Link ending to owner lookup

pub mod pg_click_repository;
pub mod pg_identity_repository;
pub mod pg_link_repository;
pub mod pg_quota_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_identity_repository::PgIdentityRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_quota_repository::PgQuotaRepository;

use crate::domain::errors::StoreError;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}
