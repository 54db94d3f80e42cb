//! API route configuration.
//!
//! All API endpoints pass through [`crate::api::middleware::auth`], which
//! authenticates the caller and charges its quota.

use crate::api::handlers::{global_stats_handler, link_stats_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes.
///
/// # Endpoints
///
/// - `GET /stats`                  - Click statistics across all links (admin)
/// - `GET /links/{ending}/stats`   - Click statistics for one link (creator or admin)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(global_stats_handler))
        .route("/links/{ending}/stats", get(link_stats_handler))
}
