//! Short link ending validation.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use crate::error::AppError;

static ENDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid ending regex"));

/// Validates a link ending taken from the request path.
///
/// # Rules
///
/// - Non-empty
/// - Letters, digits, `-` and `_` only
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the ending is empty or contains other characters.
pub fn validate_ending(ending: &str) -> Result<(), AppError> {
    if !ENDING_RE.is_match(ending) {
        return Err(AppError::bad_request(
            "Invalid or missing parameters.",
            json!({ "ending": ending }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_endings() {
        assert!(validate_ending("abc123").is_ok());
        assert!(validate_ending("my-link_2024").is_ok());
        assert!(validate_ending("X").is_ok());
    }

    #[test]
    fn test_invalid_endings() {
        assert!(validate_ending("").is_err());
        assert!(validate_ending("has space").is_err());
        assert!(validate_ending("dot.ted").is_err());
        assert!(validate_ending("slash/ed").is_err());
        assert!(validate_ending("ünïcode").is_err());
    }

    #[test]
    fn test_invalid_ending_is_validation_error() {
        assert!(matches!(
            validate_ending("bad!").unwrap_err(),
            AppError::Validation { .. }
        ));
    }
}
