//! Access control middleware.

use axum::{
    extract::{FromRequestParts, Query, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde::Deserialize;
use serde_json::json;

use crate::domain::errors::AuthError;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_addr::client_address;

#[derive(Debug, Default, Deserialize)]
struct KeyParams {
    key: Option<String>,
}

/// Authenticates the caller and charges one call to its quota.
///
/// # Credential
///
/// The API key is read from the `key` query parameter, or else from
///
/// ```text
/// Authorization: Bearer <key>
/// ```
///
/// Without either, the caller is anonymous (identified by its address) if
/// anonymous access is enabled.
///
/// # Errors
///
/// - `400 Bad Request` if the query string carries a malformed `key` (e.g. repeated)
/// - `401 Unauthorized` if the key is missing (and anonymous access is off) or invalid
/// - `429 Too Many Requests` if the quota for the current window is used up
/// - `503 Service Unavailable` if the identity or quota store fails
///
/// On success the resolved [`crate::domain::entities::Identity`] is inserted
/// into the request extensions for the handlers.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/stats", get(global_stats_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let Query(params) = Query::<KeyParams>::try_from_uri(&parts.uri).map_err(|e| {
        AppError::bad_request(
            "Invalid or missing parameters.",
            json!({ "key": e.body_text() }),
        )
    })?;

    // An empty `key` counts as absent so it cannot mask a Bearer header.
    let credential = match params.key.filter(|key| !key.is_empty()) {
        Some(key) => Some(key),
        None => AuthBearer::from_request_parts(&mut parts, &())
            .await
            .ok()
            .map(|AuthBearer(token)| token),
    };

    let caller = client_address(&parts.headers, &parts.extensions, st.behind_proxy);

    let identity = match st
        .access_gate
        .authenticate(credential.as_deref(), &caller)
        .await
    {
        Ok(identity) => identity,
        Err(e) => {
            match &e {
                AuthError::QuotaExceeded => {
                    tracing::info!(caller = %caller, "API quota exceeded");
                }
                AuthError::StoreUnavailable(err) => {
                    tracing::error!(error = %err, "Access gate store failure");
                }
                AuthError::MissingCredential | AuthError::InvalidCredential => {
                    tracing::debug!(caller = %caller, reason = %e, "Authentication failed");
                }
            }
            return Err(e.into());
        }
    };

    tracing::debug!(subject = identity.subject(), "Caller authenticated");
    parts.extensions.insert(identity);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
