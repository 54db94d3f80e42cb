//! HTTP-facing error type.
//!
//! Domain failures ([`AuthError`], [`WindowError`], [`StoreError`]) convert into
//! [`AppError`], which renders as:
//!
//! ```json
//! { "error": { "code": "quota_exceeded", "message": "Quota exceeded.", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::errors::{AuthError, StoreError, WindowError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Forbidden { message: String, details: Value },
    #[error("{message}")]
    QuotaExceeded { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn quota_exceeded(message: impl Into<String>, details: Value) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable code placed in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::Forbidden { .. } => "access_denied",
            AppError::QuotaExceeded { .. } => "quota_exceeded",
            AppError::NotFound { .. } => "not_found",
            AppError::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::Forbidden { message, details }
            | AppError::QuotaExceeded { message, details }
            | AppError::NotFound { message, details }
            | AppError::StoreUnavailable { message, details } => (message, details),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::store_unavailable("Store unavailable", json!({ "reason": e.to_string() }))
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredential => AppError::unauthorized(
                "Authentication token required.",
                json!({ "reason": "missing_credential" }),
            ),
            AuthError::InvalidCredential => AppError::unauthorized(
                "Authentication token invalid.",
                json!({ "reason": "invalid_credential" }),
            ),
            AuthError::QuotaExceeded => AppError::quota_exceeded("Quota exceeded.", json!({})),
            AuthError::StoreUnavailable(e) => e.into(),
        }
    }
}

impl From<WindowError> for AppError {
    fn from(e: WindowError) -> Self {
        let reason = match &e {
            WindowError::InvalidDate { .. } => "invalid_date",
            WindowError::InvertedBounds => "inverted_bounds",
            WindowError::RangeTooBroad { .. } => "range_too_broad",
        };
        AppError::bad_request(e.to_string(), json!({ "reason": reason }))
    }
}
