//! HTTP server initialization and runtime setup.
//!
//! Handles store setup for the configured backend and the Axum server lifecycle.

use crate::config::{Config, StorageBackend};
use crate::domain::entities::{IdentityRecord, Role};
use crate::infrastructure::memory::{
    MemoryClickRepository, MemoryIdentityRepository, MemoryLinkRepository, MemoryQuotaRepository,
};
use crate::infrastructure::persistence::{
    PgClickRepository, PgIdentityRepository, PgLinkRepository, PgQuotaRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, Stores};
use crate::utils::api_key::hash_api_key;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Username of the account seeded from `BOOTSTRAP_ADMIN_KEY`.
pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool, or in-memory stores
/// - Access gate and analytics service
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let stores = match config.storage_backend {
        StorageBackend::Postgres => postgres_stores(&config).await?,
        StorageBackend::Memory => memory_stores(&config),
    };

    let state = AppState::from_stores(
        stores,
        config.access_settings(),
        config.analytics_max_days,
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn postgres_stores(config: &Config) -> Result<Stores> {
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required with STORAGE_BACKEND=postgres")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    let pool = Arc::new(pool);

    Ok(Stores {
        identities: Arc::new(PgIdentityRepository::new(pool.clone())),
        quotas: Arc::new(PgQuotaRepository::new(pool.clone())),
        clicks: Arc::new(PgClickRepository::new(pool.clone())),
        links: Arc::new(PgLinkRepository::new(pool)),
    })
}

/// Builds empty in-memory stores, seeding the bootstrap admin if configured.
pub fn memory_stores(config: &Config) -> Stores {
    let identities = MemoryIdentityRepository::new();

    if let Some(key) = &config.bootstrap_admin_key {
        identities.insert(bootstrap_admin(&config.api_key_signing_secret, key));
        tracing::info!(username = BOOTSTRAP_ADMIN_USERNAME, "Bootstrap admin seeded");
    }

    tracing::warn!("Using in-memory stores; all state is lost on restart");

    Stores {
        identities: Arc::new(identities),
        quotas: Arc::new(MemoryQuotaRepository::new()),
        clicks: Arc::new(MemoryClickRepository::new()),
        links: Arc::new(MemoryLinkRepository::new()),
    }
}

fn bootstrap_admin(signing_secret: &str, key: &str) -> IdentityRecord {
    IdentityRecord {
        id: 1,
        username: BOOTSTRAP_ADMIN_USERNAME.to_string(),
        api_key_hash: Some(hash_api_key(signing_secret, key)),
        active: true,
        api_active: true,
        api_quota: None,
        role: Role::Admin,
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Identity;

    fn memory_config(bootstrap_admin_key: Option<&str>) -> Config {
        Config {
            storage_backend: StorageBackend::Memory,
            database_url: None,
            bootstrap_admin_key: bootstrap_admin_key.map(str::to_string),
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            api_key_signing_secret: "secret".to_string(),
            anon_api_enabled: false,
            api_quota_default: 60,
            quota_window_seconds: 60,
            analytics_max_days: 365,
            api_key_length: 32,
            db_max_connections: 10,
            db_connect_timeout: 30,
            db_idle_timeout: 600,
            db_max_lifetime: 1800,
        }
    }

    #[tokio::test]
    async fn test_bootstrap_admin_can_authenticate() {
        let config = memory_config(Some("bootstrap-key-123456"));
        let state = AppState::from_stores(
            memory_stores(&config),
            config.access_settings(),
            config.analytics_max_days,
            false,
        );

        let identity = state
            .access_gate
            .authenticate(Some("bootstrap-key-123456"), "127.0.0.1")
            .await
            .unwrap();

        assert!(matches!(identity, Identity::Authenticated(_)));
        assert!(identity.is_admin());
        assert_eq!(identity.subject(), BOOTSTRAP_ADMIN_USERNAME);
    }

    #[tokio::test]
    async fn test_memory_stores_without_bootstrap_are_empty() {
        let config = memory_config(None);
        let stores = memory_stores(&config);

        assert!(stores.identities.find_by_id(1, true).await.unwrap().is_none());
    }
}
