//! Repository trait definitions for the domain layer.
//!
//! These traits are the contracts of the external stores the gate and the
//! analytics engine depend on. Implementations live in
//! `crate::infrastructure::persistence` (PostgreSQL) and
//! `crate::infrastructure::memory` (in-process); mocks are generated with
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`IdentityRepository`] - Account lookup by credential or id
//! - [`QuotaRepository`] - Atomic per-window call counters
//! - [`ClickRepository`] - Click log reads
//! - [`LinkRepository`] - Link ending to id/creator

pub mod click_repository;
pub mod identity_repository;
pub mod link_repository;
pub mod quota_repository;

pub use click_repository::ClickRepository;
pub use identity_repository::IdentityRepository;
pub use link_repository::LinkRepository;
pub use quota_repository::QuotaRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use identity_repository::MockIdentityRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use quota_repository::MockQuotaRepository;
