//! HTTP request handlers for API endpoints.
//!
//! Handlers receive the caller [`crate::domain::entities::Identity`] resolved
//! by [`crate::api::middleware::auth`] through request extensions.

pub mod stats;

pub use stats::{global_stats_handler, link_stats_handler};
