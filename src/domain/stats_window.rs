//! Validated time range (and optional link scope) for analytics queries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::domain::errors::WindowError;

/// Default maximum number of whole days between the two bounds.
pub const DEFAULT_MAX_DAYS: u32 = 365;

/// Which links a stats query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    All,
    Link(i64),
}

impl StatsScope {
    /// The link id to filter on, `None` for all links.
    pub fn link_id(&self) -> Option<i64> {
        match self {
            StatsScope::All => None,
            StatsScope::Link(id) => Some(*id),
        }
    }

    pub fn includes(&self, link_id: i64) -> bool {
        match self {
            StatsScope::All => true,
            StatsScope::Link(id) => *id == link_id,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Left,
    Right,
}

/// A time range that passed validation.
///
/// Fields are private so a `StatsWindow` can only come out of [`StatsWindow::new`]
/// or [`StatsWindow::from_bounds`], both of which check the invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    scope: StatsScope,
    left_bound: DateTime<Utc>,
    right_bound: DateTime<Utc>,
}

impl StatsWindow {
    /// Parses and validates raw bounds.
    ///
    /// Accepted formats: RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`
    /// (both read as UTC) and plain `YYYY-MM-DD`. A plain date covers the whole
    /// day: it starts the day on the left and ends it on the right.
    ///
    /// # Errors
    ///
    /// - [`WindowError::InvalidDate`] if a bound does not parse
    /// - [`WindowError::InvertedBounds`] if left is after right
    /// - [`WindowError::RangeTooBroad`] if the span exceeds `max_days` whole days
    pub fn new(
        scope: StatsScope,
        left_raw: &str,
        right_raw: &str,
        max_days: u32,
    ) -> Result<Self, WindowError> {
        let left_bound = parse_bound(left_raw, Bound::Left)?;
        let right_bound = parse_bound(right_raw, Bound::Right)?;

        Self::from_bounds(scope, left_bound, right_bound, max_days)
    }

    /// Validates already-parsed bounds.
    pub fn from_bounds(
        scope: StatsScope,
        left_bound: DateTime<Utc>,
        right_bound: DateTime<Utc>,
        max_days: u32,
    ) -> Result<Self, WindowError> {
        if left_bound > right_bound {
            return Err(WindowError::InvertedBounds);
        }

        let days = (right_bound - left_bound).num_days();
        if days > i64::from(max_days) {
            return Err(WindowError::RangeTooBroad { days, max_days });
        }

        Ok(Self {
            scope,
            left_bound,
            right_bound,
        })
    }

    pub fn scope(&self) -> StatsScope {
        self.scope
    }

    pub fn left_bound(&self) -> DateTime<Utc> {
        self.left_bound
    }

    pub fn right_bound(&self) -> DateTime<Utc> {
        self.right_bound
    }

    /// Inclusive on both ends.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.left_bound <= at && at <= self.right_bound
    }
}

fn parse_bound(raw: &str, bound: Bound) -> Result<DateTime<Utc>, WindowError> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        // Built from the date itself so the last representable day cannot overflow.
        let at = match bound {
            Bound::Left => Some(date.and_time(NaiveTime::MIN)),
            Bound::Right => date.and_hms_nano_opt(23, 59, 59, 999_999_999),
        };
        return at.map(|naive| naive.and_utc()).ok_or_else(|| invalid_date(raw));
    }

    Err(invalid_date(raw))
}

fn invalid_date(raw: &str) -> WindowError {
    WindowError::InvalidDate {
        raw: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window(left: &str, right: &str) -> Result<StatsWindow, WindowError> {
        StatsWindow::new(StatsScope::All, left, right, DEFAULT_MAX_DAYS)
    }

    #[test]
    fn test_rfc3339_bounds() {
        let w = window("2024-01-01T00:00:00Z", "2024-01-31T12:30:00+02:00").unwrap();

        assert_eq!(w.left_bound(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            w.right_bound(),
            Utc.with_ymd_and_hms(2024, 1, 31, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_naive_datetime_bounds_are_utc() {
        let w = window("2024-01-01 08:00:00", "2024-01-02T09:15:00").unwrap();

        assert_eq!(w.left_bound(), Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
        assert_eq!(w.right_bound(), Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap());
    }

    #[test]
    fn test_plain_dates_cover_whole_days() {
        let w = window("2024-01-01", "2024-01-03").unwrap();

        assert!(w.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert!(w.contains(Utc.with_ymd_and_hms(2024, 1, 3, 23, 59, 59).unwrap()));
        assert!(!w.contains(Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap()));
        assert!(!w.contains(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_extreme_calendar_dates() {
        let max = NaiveDate::MAX.format("%Y-%m-%d").to_string();
        let min = NaiveDate::MIN.format("%Y-%m-%d").to_string();

        assert!(matches!(
            window("2024-01-01", &max),
            Err(WindowError::RangeTooBroad { .. })
        ));

        let last_day = window(&max, &max).unwrap();
        assert_eq!(
            last_day.right_bound(),
            NaiveDate::MAX
                .and_hms_nano_opt(23, 59, 59, 999_999_999)
                .unwrap()
                .and_utc()
        );

        let first_day = window(&min, &min).unwrap();
        assert_eq!(
            first_day.left_bound(),
            NaiveDate::MIN.and_time(NaiveTime::MIN).and_utc()
        );
        assert!(matches!(
            window(&min, "2024-01-01"),
            Err(WindowError::RangeTooBroad { .. })
        ));
    }

    #[test]
    fn test_invalid_date() {
        assert_eq!(
            window("not-a-date", "2024-01-01"),
            Err(WindowError::InvalidDate {
                raw: "not-a-date".to_string()
            })
        );
        assert!(matches!(
            window("2024-01-01", "2024-13-45"),
            Err(WindowError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_inverted_bounds() {
        assert_eq!(
            window("2024-02-01T00:00:00Z", "2024-01-01T00:00:00Z"),
            Err(WindowError::InvertedBounds)
        );
        assert_eq!(
            window("2024-01-02", "2024-01-01"),
            Err(WindowError::InvertedBounds)
        );
    }

    #[test]
    fn test_equal_bounds_are_valid() {
        let w = window("2024-01-01T10:00:00Z", "2024-01-01T10:00:00Z").unwrap();

        assert_eq!(w.left_bound(), w.right_bound());
        assert!(w.contains(w.left_bound()));
    }

    #[test]
    fn test_span_at_maximum_is_valid() {
        // 2024 is a leap year: Jan 1 -> Dec 31 is exactly 365 days.
        assert!(window("2024-01-01T00:00:00Z", "2024-12-31T00:00:00Z").is_ok());
        assert!(window("2024-01-01", "2024-12-31").is_ok());
    }

    #[test]
    fn test_span_one_day_over_maximum() {
        assert_eq!(
            window("2024-01-01T00:00:00Z", "2025-01-01T00:00:00Z"),
            Err(WindowError::RangeTooBroad {
                days: 366,
                max_days: 365
            })
        );
        assert!(matches!(
            window("2024-01-01", "2025-01-01"),
            Err(WindowError::RangeTooBroad { .. })
        ));
    }

    #[test]
    fn test_configured_maximum() {
        let ok = StatsWindow::new(StatsScope::All, "2024-01-01", "2024-01-08", 7);
        let too_broad = StatsWindow::new(StatsScope::All, "2024-01-01", "2024-01-09", 7);

        assert!(ok.is_ok());
        assert!(matches!(too_broad, Err(WindowError::RangeTooBroad { days: 8, max_days: 7 })));
    }

    #[test]
    fn test_scope() {
        let w = StatsWindow::new(StatsScope::Link(42), "2024-01-01", "2024-01-02", 365).unwrap();

        assert_eq!(w.scope().link_id(), Some(42));
        assert!(w.scope().includes(42));
        assert!(!w.scope().includes(43));
        assert_eq!(StatsScope::All.link_id(), None);
        assert!(StatsScope::All.includes(-1));
    }
}
