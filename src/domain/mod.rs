//! Domain layer: entities, rules and repository contracts.
//!
//! Nothing here depends on HTTP or a database driver.
//!
//! # Architecture
//!
//! - [`entities`] - Identity, click and link data structures
//! - [`repositories`] - Store contracts implemented by the infrastructure layer
//! - [`quota`] - Quota rule and quota windows
//! - [`stats_window`] - Validated analytics time range
//! - [`aggregation`] - Day, country and referrer aggregations
//! - [`errors`] - Typed failures
//!
//! # Request Flow
//!
//! 1. [`crate::application::services::AccessGate`] turns a credential into an
//!    [`entities::Identity`] and records the call against its quota
//! 2. Analytics calls build a [`stats_window::StatsWindow`]
//! 3. [`crate::application::services::AnalyticsService`] loads clicks via
//!    [`repositories::ClickRepository`] and runs [`aggregation::aggregate`]

pub mod aggregation;
pub mod entities;
pub mod errors;
pub mod quota;
pub mod repositories;
pub mod stats_window;
