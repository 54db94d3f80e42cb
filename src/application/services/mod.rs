//! Business logic services for the application layer.

pub mod access_gate;
pub mod analytics_service;
pub mod quota_policy;

pub use access_gate::{AccessGate, AccessSettings};
pub use analytics_service::AnalyticsService;
pub use quota_policy::QuotaPolicy;
