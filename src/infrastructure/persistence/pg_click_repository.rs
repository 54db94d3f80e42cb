//! PostgreSQL implementation of the click log.
//!
//! Reads the `clicks` table:
//!
//! | column       | type          |
//! |--------------|---------------|
//! | `link_id`    | `BIGINT`      |
//! | `clicked_at` | `TIMESTAMPTZ` |
//! | `country`    | `TEXT NULL`   |
//! | `referer`    | `TEXT NULL`   |
//!
//! `referer` holds the referrer host only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ClickEvent;
use crate::domain::errors::StoreError;
use crate::domain::repositories::ClickRepository;

#[derive(Debug, sqlx::FromRow)]
struct ClickRow {
    link_id: i64,
    clicked_at: DateTime<Utc>,
    country: Option<String>,
    referer: Option<String>,
}

/// PostgreSQL repository for click range queries.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn query(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        link_id: Option<i64>,
    ) -> Result<Vec<ClickEvent>, StoreError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT link_id, clicked_at, country, referer
            FROM clicks
            WHERE clicked_at BETWEEN $1 AND $2
              AND ($3::bigint IS NULL OR link_id = $3)
            ORDER BY clicked_at ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                ClickEvent::new(
                    r.link_id,
                    r.clicked_at,
                    r.country.as_deref(),
                    r.referer.as_deref(),
                )
            })
            .collect())
    }
}
