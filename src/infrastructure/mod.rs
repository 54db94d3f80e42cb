//! Infrastructure layer for external integrations.
//!
//! This layer implements the store traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - In-process stores for tests and local runs
//! - [`persistence`] - PostgreSQL repository implementations

pub mod memory;
pub mod persistence;
