//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization and query-string deserialization.

pub mod stats;
