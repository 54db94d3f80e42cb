//! PostgreSQL implementation of the identity store.
//!
//! Reads the `users` table:
//!
//! | column        | type           |
//! |---------------|----------------|
//! | `id`          | `BIGINT`       |
//! | `username`    | `TEXT`         |
//! | `api_key`     | `TEXT NULL`    |
//! | `active`      | `BOOLEAN`      |
//! | `api_active`  | `BOOLEAN`      |
//! | `api_quota`   | `BIGINT NULL`  |
//! | `role`        | `TEXT NULL`    |
//!
//! `api_key` holds the HMAC-SHA256 hex digest of the key, never the key itself.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{IdentityRecord, Role};
use crate::domain::errors::StoreError;
use crate::domain::repositories::IdentityRepository;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    api_key: Option<String>,
    active: bool,
    api_active: bool,
    api_quota: Option<i64>,
    role: Option<String>,
}

impl From<UserRow> for IdentityRecord {
    fn from(row: UserRow) -> Self {
        IdentityRecord {
            id: row.id,
            username: row.username,
            api_key_hash: row.api_key,
            active: row.active,
            api_active: row.api_active,
            api_quota: row.api_quota,
            role: Role::from_db(row.role.as_deref().unwrap_or_default()),
        }
    }
}

/// PostgreSQL repository for account lookup.
pub struct PgIdentityRepository {
    pool: Arc<PgPool>,
}

impl PgIdentityRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Replaces the stored key hash of an account and enables API access.
    ///
    /// Returns `false` when no account has this id.
    pub async fn set_api_key(&self, id: i64, api_key_hash: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET api_key = $2, api_active = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(api_key_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl IdentityRepository for PgIdentityRepository {
    async fn find_active_by_credential(
        &self,
        credential_hash: &str,
    ) -> Result<Option<IdentityRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, api_key, active, api_active, api_quota, role
            FROM users
            WHERE api_key = $1
              AND active
              AND api_active
            "#,
        )
        .bind(credential_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(IdentityRecord::from))
    }

    async fn find_by_id(
        &self,
        id: i64,
        include_inactive: bool,
    ) -> Result<Option<IdentityRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, api_key, active, api_active, api_quota, role
            FROM users
            WHERE id = $1
              AND ($2 OR active)
            "#,
        )
        .bind(id)
        .bind(include_inactive)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(IdentityRecord::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: Option<&str>) -> UserRow {
        UserRow {
            id: 3,
            username: "carol".to_string(),
            api_key: Some("abc".to_string()),
            active: true,
            api_active: false,
            api_quota: Some(-1),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_row_into_record() {
        let record = IdentityRecord::from(row(Some("admin")));

        assert_eq!(record.id, 3);
        assert_eq!(record.username, "carol");
        assert_eq!(record.api_key_hash.as_deref(), Some("abc"));
        assert!(!record.api_active);
        assert_eq!(record.api_quota, Some(-1));
        assert_eq!(record.role, Role::Admin);
    }

    #[test]
    fn test_missing_role_is_default() {
        assert_eq!(IdentityRecord::from(row(None)).role, Role::Default);
        assert_eq!(IdentityRecord::from(row(Some(""))).role, Role::Default);
    }
}
