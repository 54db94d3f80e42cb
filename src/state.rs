//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{AccessGate, AccessSettings, AnalyticsService};
use crate::domain::repositories::{
    ClickRepository, IdentityRepository, LinkRepository, QuotaRepository,
};

/// Access gate over whichever identity and quota stores the server was started with.
pub type SharedAccessGate = Arc<AccessGate<dyn IdentityRepository, dyn QuotaRepository>>;

/// Analytics service over whichever click log the server was started with.
pub type SharedAnalytics = Arc<AnalyticsService<dyn ClickRepository>>;

/// The four stores a running service reads from.
#[derive(Clone)]
pub struct Stores {
    pub identities: Arc<dyn IdentityRepository>,
    pub quotas: Arc<dyn QuotaRepository>,
    pub clicks: Arc<dyn ClickRepository>,
    pub links: Arc<dyn LinkRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub access_gate: SharedAccessGate,
    pub analytics: SharedAnalytics,
    pub links: Arc<dyn LinkRepository>,
    /// Read the caller address from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        access_gate: SharedAccessGate,
        analytics: SharedAnalytics,
        links: Arc<dyn LinkRepository>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            access_gate,
            analytics,
            links,
            behind_proxy,
        }
    }

    /// Wires the access gate and analytics service over one set of stores.
    pub fn from_stores(
        stores: Stores,
        settings: AccessSettings,
        analytics_max_days: u32,
        behind_proxy: bool,
    ) -> Self {
        let access_gate = Arc::new(AccessGate::new(stores.identities, stores.quotas, settings));
        let analytics = Arc::new(AnalyticsService::new(stores.clicks, analytics_max_days));

        Self::new(access_gate, analytics, stores.links, behind_proxy)
    }
}
