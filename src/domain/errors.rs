//! Typed failures produced by the domain and application layers.
//!
//! Every failure is terminal for the request: nothing here is retried
//! internally. The HTTP layer translates these into [`crate::error::AppError`].

use thiserror::Error;

/// Failure of an underlying store (identity, quota, click log or links).
///
/// Carries the driver message as-is so callers see what actually failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Authentication and quota failures raised by [`crate::application::services::AccessGate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential was supplied and anonymous access is disabled.
    #[error("authentication token required")]
    MissingCredential,

    /// The credential did not resolve to an active, API-enabled account.
    ///
    /// Wrong key, inactive account and disabled API access all map here.
    #[error("authentication token invalid")]
    InvalidCredential,

    /// The identity has used up its calls for the current quota window.
    #[error("quota exceeded")]
    QuotaExceeded,

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

/// Rejections raised while building a [`crate::domain::stats_window::StatsWindow`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("invalid date: '{raw}'")]
    InvalidDate { raw: String },

    #[error("invalid bounds: left bound is after right bound")]
    InvertedBounds,

    #[error("bounds too broad: {days} days exceeds the maximum of {max_days}")]
    RangeTooBroad { days: i64, max_days: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts_into_auth_error() {
        let err: AuthError = StoreError::Unavailable("connection refused".to_string()).into();

        assert_eq!(
            err,
            AuthError::StoreUnavailable(StoreError::Unavailable("connection refused".to_string()))
        );
        assert_eq!(err.to_string(), "store unavailable: connection refused");
    }

    #[test]
    fn test_window_error_messages() {
        let err = WindowError::RangeTooBroad {
            days: 400,
            max_days: 365,
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("365"));

        let err = WindowError::InvalidDate {
            raw: "yesterday-ish".to_string(),
        };
        assert!(err.to_string().contains("yesterday-ish"));
    }
}
