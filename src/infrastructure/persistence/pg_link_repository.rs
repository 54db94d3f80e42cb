//! PostgreSQL implementation of link lookup.
//!
//! Reads `id`, `short_url` and `creator` from the `links` table.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::LinkRef;
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkRepository;

#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_url: String,
    creator: String,
}

/// PostgreSQL repository for resolving a link ending to its owner.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_ending(&self, ending: &str) -> Result<Option<LinkRef>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_url, creator
            FROM links
            WHERE short_url = $1
            "#,
        )
        .bind(ending)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| LinkRef::new(r.id, r.short_url, r.creator)))
    }
}
