//! DTOs for click statistics.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::aggregation::{AggregationKind, AggregationResult, StatBucket};
use crate::error::AppError;

/// Query parameters accepted by both stats endpoints.
///
/// All fields are optional at the deserialization level so a missing field
/// reports a validation error instead of a generic query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct StatsQueryParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub left_bound: Option<String>,
    pub right_bound: Option<String>,
}

/// Stats query with every required field present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsQuery<'a> {
    pub kind: AggregationKind,
    pub left_bound: &'a str,
    pub right_bound: &'a str,
}

impl StatsQueryParams {
    /// Checks that `type`, `left_bound` and `right_bound` are present and
    /// that `type` names a known aggregation.
    ///
    /// Bound parsing is left to the stats window.
    pub fn validate(&self) -> Result<StatsQuery<'_>, AppError> {
        let missing: Vec<&str> = [
            ("type", present(&self.kind)),
            ("left_bound", present(&self.left_bound)),
            ("right_bound", present(&self.right_bound)),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| name)
        .collect();

        let (Some(kind), Some(left_bound), Some(right_bound)) = (
            present(&self.kind),
            present(&self.left_bound),
            present(&self.right_bound),
        ) else {
            return Err(AppError::bad_request(
                "Invalid or missing parameters.",
                json!({ "missing": missing }),
            ));
        };

        let kind = kind.parse::<AggregationKind>().map_err(|reason| {
            AppError::bad_request("Invalid or missing parameters.", json!({ "type": reason }))
        })?;

        Ok(StatsQuery {
            kind,
            left_bound,
            right_bound,
        })
    }
}

/// One bucket of the stats result.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatBucketDto {
    pub label: String,
    pub clicks: i64,
}

impl From<StatBucket> for StatBucketDto {
    fn from(bucket: StatBucket) -> Self {
        Self {
            label: bucket.label,
            clicks: bucket.count,
        }
    }
}

/// Successful stats response.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub message: String,
    pub result: Vec<StatBucketDto>,
}

impl StatsResponse {
    pub fn ok(result: AggregationResult) -> Self {
        Self {
            message: "OK".to_string(),
            result: result.into_iter().map(StatBucketDto::from).collect(),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(kind: Option<&str>, left: Option<&str>, right: Option<&str>) -> StatsQueryParams {
        StatsQueryParams {
            kind: kind.map(str::to_string),
            left_bound: left.map(str::to_string),
            right_bound: right.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_complete_params() {
        let p = params(Some("country"), Some("2024-01-01"), Some("2024-01-31"));

        let query = p.validate().unwrap();

        assert_eq!(query.kind, AggregationKind::ByCountry);
        assert_eq!(query.left_bound, "2024-01-01");
        assert_eq!(query.right_bound, "2024-01-31");
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let p = params(Some("day"), None, Some(" "));

        let err = p.validate().unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details["missing"], json!(["left_bound", "right_bound"]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        let p = params(Some("browser"), Some("2024-01-01"), Some("2024-01-02"));

        assert!(matches!(
            p.validate().unwrap_err(),
            AppError::Validation { .. }
        ));
    }

    #[test]
    fn test_response_shape() {
        let response = StatsResponse::ok(vec![StatBucket::new("US", 3)]);

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({ "message": "OK", "result": [{ "label": "US", "clicks": 3 }] })
        );
    }

    #[test]
    fn test_type_is_read_from_query_key() {
        let p: StatsQueryParams =
            serde_json::from_value(json!({ "type": "referer", "key": "ignored" })).unwrap();

        assert_eq!(p.kind.as_deref(), Some("referer"));
        assert!(p.left_bound.is_none());
    }
}
