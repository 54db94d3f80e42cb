//! Handlers for click statistics.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::stats::{StatsQueryParams, StatsResponse};
use crate::domain::aggregation::AggregationRequest;
use crate::domain::entities::{Identity, Role};
use crate::domain::stats_window::StatsScope;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ending::validate_ending;

/// Click statistics across all links.
///
/// # Endpoint
///
/// `GET /api/v2/stats`
///
/// # Query Parameters
///
/// - `type`: `day`, `country` or `referer`
/// - `left_bound`, `right_bound`: inclusive window, RFC3339,
///   `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`
///
/// # Errors
///
/// - 403 if the caller is not an admin
/// - 400 if parameters are missing or the window is invalid
pub async fn global_stats_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<StatsQueryParams>,
) -> Result<Json<StatsResponse>, AppError> {
    if !state.access_gate.require_role(&identity, Role::Admin) {
        return Err(AppError::forbidden(
            "You do not have permission to view stats for all links.",
            json!({ "required_role": Role::Admin.as_str() }),
        ));
    }

    run_stats(&state, StatsScope::All, &params).await
}

/// Click statistics for one link, visible to its creator and to admins.
///
/// # Endpoint
///
/// `GET /api/v2/links/{ending}/stats`
///
/// Takes the same query parameters as [`global_stats_handler`].
///
/// # Errors
///
/// - 400 if the ending or the parameters are invalid
/// - 404 if no link has this ending
/// - 403 if the caller neither created the link nor is an admin
pub async fn link_stats_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(ending): Path<String>,
    Query(params): Query<StatsQueryParams>,
) -> Result<Json<StatsResponse>, AppError> {
    validate_ending(&ending)?;

    let link = state
        .links
        .find_by_ending(&ending)
        .await?
        .ok_or_else(|| AppError::not_found("Link not found.", json!({ "ending": ending })))?;

    if !state
        .access_gate
        .require_owner_or_admin(&identity, &link.creator)
    {
        return Err(AppError::forbidden(
            "You do not have permission to view stats for this link.",
            json!({ "ending": link.ending }),
        ));
    }

    run_stats(&state, StatsScope::Link(link.id), &params).await
}

async fn run_stats(
    state: &AppState,
    scope: StatsScope,
    params: &StatsQueryParams,
) -> Result<Json<StatsResponse>, AppError> {
    let query = params.validate()?;
    let window = state
        .analytics
        .window(scope, query.left_bound, query.right_bound)?;

    let result = state
        .analytics
        .run(AggregationRequest::new(query.kind, window))
        .await?;

    Ok(Json(StatsResponse::ok(result)))
}
