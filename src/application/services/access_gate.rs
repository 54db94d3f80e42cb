//! Request authentication, quota enforcement and role checks.

use std::sync::Arc;

use crate::application::services::QuotaPolicy;
use crate::domain::entities::{Identity, Role};
use crate::domain::errors::AuthError;
use crate::domain::quota::{QuotaLimit, QuotaWindow};
use crate::domain::repositories::{IdentityRepository, QuotaRepository};
use crate::utils::api_key::hash_api_key;

/// Settings the gate reads from configuration.
#[derive(Debug, Clone)]
pub struct AccessSettings {
    /// Allow calls without a credential, identified by caller address.
    pub anonymous_enabled: bool,
    /// Limit for identities without an account-level override.
    pub default_quota: QuotaLimit,
    pub quota_window: QuotaWindow,
    /// HMAC key used to hash API keys before lookup.
    pub signing_secret: String,
}

/// Entry point every protected operation passes through.
///
/// [`AccessGate::authenticate`] resolves the caller and charges one call to its
/// quota. The resulting [`Identity`] is then handed explicitly to the
/// operation, which may check it with [`AccessGate::require_role`] or
/// [`AccessGate::require_owner_or_admin`].
pub struct AccessGate<I, Q>
where
    I: IdentityRepository + ?Sized,
    Q: QuotaRepository + ?Sized,
{
    identities: Arc<I>,
    quota: QuotaPolicy<Q>,
    anonymous_enabled: bool,
    default_quota: QuotaLimit,
    signing_secret: String,
}

impl<I, Q> AccessGate<I, Q>
where
    I: IdentityRepository + ?Sized,
    Q: QuotaRepository + ?Sized,
{
    pub fn new(identities: Arc<I>, quotas: Arc<Q>, settings: AccessSettings) -> Self {
        Self {
            identities,
            quota: QuotaPolicy::new(quotas, settings.quota_window),
            anonymous_enabled: settings.anonymous_enabled,
            default_quota: settings.default_quota,
            signing_secret: settings.signing_secret,
        }
    }

    /// Resolves the caller and records the call against its quota.
    ///
    /// An absent or empty credential yields an anonymous identity
    /// (`ANONIP-<caller_address>`) when anonymous access is enabled.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredential`] if no credential is given and anonymous access is off
    /// - [`AuthError::InvalidCredential`] if the key is unknown, or the account is
    ///   inactive or has API access disabled (indistinguishable on purpose)
    /// - [`AuthError::QuotaExceeded`] if the identity has no calls left in this window
    /// - [`AuthError::StoreUnavailable`] if a store lookup fails
    pub async fn authenticate(
        &self,
        credential: Option<&str>,
        caller_address: &str,
    ) -> Result<Identity, AuthError> {
        let identity = match credential.filter(|c| !c.is_empty()) {
            None if self.anonymous_enabled => Identity::anonymous(caller_address),
            None => return Err(AuthError::MissingCredential),
            Some(key) => {
                let credential_hash = hash_api_key(&self.signing_secret, key);
                let record = self
                    .identities
                    .find_active_by_credential(&credential_hash)
                    .await?
                    .filter(|r| r.active && r.api_active)
                    .ok_or(AuthError::InvalidCredential)?;
                Identity::Authenticated(record)
            }
        };

        let limit = self.quota_limit_for(&identity);
        if !self.quota.check_and_record(identity.subject(), limit).await? {
            return Err(AuthError::QuotaExceeded);
        }

        Ok(identity)
    }

    /// Quota limit applying to `identity`.
    pub fn quota_limit_for(&self, identity: &Identity) -> QuotaLimit {
        identity
            .quota_override()
            .map(QuotaLimit::from_raw)
            .unwrap_or(self.default_quota)
    }

    /// Returns true if `identity` holds `role`. Admins satisfy every role.
    pub fn require_role(&self, identity: &Identity, role: Role) -> bool {
        identity.is_admin() || identity.role() == role
    }

    /// Returns true if `identity` is the resource owner or an admin.
    ///
    /// Anonymous identities never own resources.
    pub fn require_owner_or_admin(&self, identity: &Identity, owner_subject: &str) -> bool {
        identity.is_admin() || (!identity.is_anonymous() && identity.subject() == owner_subject)
    }
}
