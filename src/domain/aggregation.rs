//! Grouping and counting of click events.
//!
//! All bucketing is done here, from the event data itself, so results do not
//! depend on how a storage backend formats dates or orders groups.
//!
//! - [`AggregationKind::ByDay`] buckets by UTC calendar date, ascending. The
//!   series is sparse: days without clicks produce no bucket.
//! - [`AggregationKind::ByCountry`] and [`AggregationKind::ByReferrer`] are
//!   ranked by count, descending. Ties keep the order in which labels were
//!   first seen in the input.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::domain::entities::ClickEvent;
use crate::domain::stats_window::StatsWindow;

/// Label used for clicks without a referrer host.
pub const DIRECT_LABEL: &str = "Direct";

/// Label used for clicks without a resolved country.
pub const UNKNOWN_COUNTRY_LABEL: &str = "Unknown";

/// Which aggregate view to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationKind {
    ByDay,
    ByCountry,
    ByReferrer,
}

impl AggregationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationKind::ByDay => "day",
            AggregationKind::ByCountry => "country",
            AggregationKind::ByReferrer => "referer",
        }
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(AggregationKind::ByDay),
            "country" => Ok(AggregationKind::ByCountry),
            "referer" | "referrer" => Ok(AggregationKind::ByReferrer),
            other => Err(format!("unknown stats type '{other}'")),
        }
    }
}

/// An aggregation to run over one validated window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationRequest {
    pub kind: AggregationKind,
    pub window: StatsWindow,
}

impl AggregationRequest {
    pub fn new(kind: AggregationKind, window: StatsWindow) -> Self {
        Self { kind, window }
    }
}

/// One `(label, count)` pair of an aggregation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatBucket {
    pub label: String,
    pub count: i64,
}

impl StatBucket {
    pub fn new(label: impl Into<String>, count: i64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Ordered buckets; see the module docs for the ordering of each kind.
pub type AggregationResult = Vec<StatBucket>;

/// Runs `request` over `events`.
///
/// Events outside the window or its scope are skipped, so callers may pass a
/// superset of the qualifying events.
pub fn aggregate<'a, I>(request: &AggregationRequest, events: I) -> AggregationResult
where
    I: IntoIterator<Item = &'a ClickEvent>,
{
    let window = request.window;
    let qualifying = events
        .into_iter()
        .filter(move |e| window.contains(e.clicked_at) && window.scope().includes(e.link_id));

    match request.kind {
        AggregationKind::ByDay => by_day(qualifying),
        AggregationKind::ByCountry => ranked(qualifying.map(|e| {
            e.country
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(UNKNOWN_COUNTRY_LABEL)
        })),
        AggregationKind::ByReferrer => ranked(qualifying.map(|e| {
            e.referer_host
                .as_deref()
                .filter(|h| !h.is_empty())
                .unwrap_or(DIRECT_LABEL)
        })),
    }
}

fn by_day<'a>(events: impl Iterator<Item = &'a ClickEvent>) -> AggregationResult {
    let mut days: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for event in events {
        *days.entry(event.clicked_at.date_naive()).or_insert(0) += 1;
    }

    days.into_iter()
        .map(|(day, count)| StatBucket::new(day.format("%Y-%m-%d").to_string(), count))
        .collect()
}

fn ranked<'a>(labels: impl Iterator<Item = &'a str>) -> AggregationResult {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<StatBucket> = Vec::new();

    for label in labels {
        match position.get(label) {
            Some(&i) => buckets[i].count += 1,
            None => {
                position.insert(label, buckets.len());
                buckets.push(StatBucket::new(label, 1));
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}
