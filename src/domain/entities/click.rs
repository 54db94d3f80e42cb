//! Click entity read from the click log.

use chrono::{DateTime, Utc};

/// A single recorded visit of a short link.
///
/// The analytics engine only reads these; they are appended by the redirect
/// path, which lives outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    /// ISO country code resolved at click time.
    pub country: Option<String>,
    /// Host part of the `Referer` header.
    pub referer_host: Option<String>,
}

impl ClickEvent {
    pub fn new(
        link_id: i64,
        clicked_at: DateTime<Utc>,
        country: Option<&str>,
        referer_host: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            clicked_at,
            country: country.map(str::to_string),
            referer_host: referer_host.map(str::to_string),
        }
    }
}
