//! In-process store implementations.
//!
//! Used by the test suites and by `STORAGE_BACKEND=memory` for local runs.
//! State is lost on restart.
//!
//! # Repositories
//!
//! - [`MemoryIdentityRepository`] - Accounts keyed by id
//! - [`MemoryQuotaRepository`] - Per-subject window counters
//! - [`MemoryClickRepository`] - Append-only click log
//! - [`MemoryLinkRepository`] - Links keyed by ending

pub mod click_repository;
pub mod identity_repository;
pub mod link_repository;
pub mod quota_repository;

pub use click_repository::MemoryClickRepository;
pub use identity_repository::MemoryIdentityRepository;
pub use link_repository::MemoryLinkRepository;
pub use quota_repository::MemoryQuotaRepository;
