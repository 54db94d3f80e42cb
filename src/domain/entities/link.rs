//! Minimal link reference used to scope and authorize per-link stats.

/// A short link as seen by the analytics layer: its id and who created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub id: i64,
    pub ending: String,
    /// Subject of the identity that created the link.
    pub creator: String,
}

impl LinkRef {
    pub fn new(id: i64, ending: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            id,
            ending: ending.into(),
            creator: creator.into(),
        }
    }
}
