//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/v2/*` - REST API (API key or anonymous access)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Access gate** - Authentication and per-identity quota
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
pub fn router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .nest("/api/v2", api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] wrapped so that a
/// trailing slash does not change which route matches.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
