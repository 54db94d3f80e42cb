#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use link_gate::application::services::AccessSettings;
use link_gate::domain::entities::{ClickEvent, IdentityRecord, LinkRef, Role};
use link_gate::domain::quota::{QuotaLimit, QuotaWindow};
use link_gate::infrastructure::memory::{
    MemoryClickRepository, MemoryIdentityRepository, MemoryLinkRepository, MemoryQuotaRepository,
};
use link_gate::routes::router;
use link_gate::state::{AppState, Stores};
use link_gate::utils::api_key::hash_api_key;

pub const SECRET: &str = "test-signing-secret";

pub const ADMIN_KEY: &str = "adminkey0000000000000001";
pub const ALICE_KEY: &str = "alicekey0000000000000001";
pub const BOB_KEY: &str = "bobkey000000000000000001";

pub const ALICE_LINK: &str = "promo";
pub const BOB_LINK: &str = "other";

pub struct TestApp {
    pub server: TestServer,
    pub identities: Arc<MemoryIdentityRepository>,
    pub quotas: Arc<MemoryQuotaRepository>,
    pub clicks: Arc<MemoryClickRepository>,
    pub links: Arc<MemoryLinkRepository>,
}

pub fn settings(anonymous_enabled: bool, default_quota: i64) -> AccessSettings {
    AccessSettings {
        anonymous_enabled,
        default_quota: QuotaLimit::from_raw(default_quota),
        quota_window: QuotaWindow::from_secs(3600),
        signing_secret: SECRET.to_string(),
    }
}

pub fn account(id: i64, username: &str, key: &str, role: Role) -> IdentityRecord {
    IdentityRecord {
        id,
        username: username.to_string(),
        api_key_hash: Some(hash_api_key(SECRET, key)),
        active: true,
        api_active: true,
        api_quota: None,
        role,
    }
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

/// Builds a server over in-memory stores holding three accounts, two links
/// and a handful of clicks in March 2024.
///
/// Callers are identified by `X-Forwarded-For` when anonymous.
pub async fn spawn_app(settings: AccessSettings) -> TestApp {
    let identities = Arc::new(MemoryIdentityRepository::new());
    identities.insert(account(1, "root", ADMIN_KEY, Role::Admin));
    identities.insert(account(2, "alice", ALICE_KEY, Role::Default));
    identities.insert(account(3, "bob", BOB_KEY, Role::Default));

    let links = Arc::new(MemoryLinkRepository::new());
    links.insert(LinkRef::new(10, ALICE_LINK, "alice"));
    links.insert(LinkRef::new(11, BOB_LINK, "bob"));

    let clicks = Arc::new(MemoryClickRepository::new());
    clicks
        .append(ClickEvent::new(10, at(1, 9), Some("US"), Some("google.com")))
        .await;
    clicks
        .append(ClickEvent::new(10, at(1, 18), Some("US"), None))
        .await;
    clicks
        .append(ClickEvent::new(10, at(2, 7), Some("DE"), Some("google.com")))
        .await;
    clicks
        .append(ClickEvent::new(11, at(2, 8), Some("FR"), Some("bing.com")))
        .await;

    let quotas = Arc::new(MemoryQuotaRepository::new());

    let stores = Stores {
        identities: identities.clone(),
        quotas: quotas.clone(),
        clicks: clicks.clone(),
        links: links.clone(),
    };
    let state = AppState::from_stores(stores, settings, 365, true);

    let server = TestServer::new(router(state)).unwrap();

    TestApp {
        server,
        identities,
        quotas,
        clicks,
        links,
    }
}
