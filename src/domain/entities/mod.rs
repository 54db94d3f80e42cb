//! Core domain entities.
//!
//! Entities are plain data structures; behavior lives in the domain modules
//! ([`crate::domain::quota`], [`crate::domain::stats_window`],
//! [`crate::domain::aggregation`]) and the application services.
//!
//! # Entity Types
//!
//! - [`Identity`] - The resolved caller of one request
//! - [`IdentityRecord`] - A stored account
//! - [`ClickEvent`] - One entry of the click log
//! - [`LinkRef`] - Link id and creator, for scoping and ownership checks

pub mod click;
pub mod identity;
pub mod link;

pub use click::ClickEvent;
pub use identity::{ANONYMOUS_SUBJECT_PREFIX, Identity, IdentityRecord, Role};
pub use link::LinkRef;
