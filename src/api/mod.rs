//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into access-gate and analytics calls
//! and formats responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Query parameters and response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Access control and tracing middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
