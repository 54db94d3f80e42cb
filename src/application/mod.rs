//! Application layer services.
//!
//! Services orchestrate repository calls and domain rules and give the HTTP
//! handlers a small API. They do not log; failures are returned as typed
//! errors for the caller to translate.
//!
//! # Available Services
//!
//! - [`services::access_gate::AccessGate`] - Identity resolution, quota, role checks
//! - [`services::quota_policy::QuotaPolicy`] - Atomic per-identity call counting
//! - [`services::analytics_service::AnalyticsService`] - Day, country and referrer stats

pub mod services;
