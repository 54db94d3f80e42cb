//! HTTP middleware for request processing.
//!
//! Provides access control and request tracing.

pub mod auth;
pub mod tracing;
