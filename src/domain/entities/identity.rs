//! Caller identity resolved for a single request.

use std::fmt;

/// Prefix of the subject synthesized for anonymous callers.
pub const ANONYMOUS_SUBJECT_PREFIX: &str = "ANONIP-";

/// Account role.
///
/// Stored as text: `"admin"` is an administrator, any other value
/// (including the empty string) is a regular account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Default,
}

impl Role {
    /// Parses the stored role column.
    pub fn from_db(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Default
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Default => "default",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored account as returned by the identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub id: i64,
    pub username: String,
    pub api_key_hash: Option<String>,
    pub active: bool,
    pub api_active: bool,
    /// Per-account quota override. Negative means unlimited, `None` falls
    /// back to the configured default.
    pub api_quota: Option<i64>,
    pub role: Role,
}

/// The resolved caller of one request.
///
/// Produced by the access gate and passed explicitly to whatever handles the
/// request; it is never stored globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Authenticated(IdentityRecord),
    Anonymous { subject: String },
}

impl Identity {
    /// Builds the anonymous identity for a caller network address.
    pub fn anonymous(caller_address: &str) -> Self {
        Identity::Anonymous {
            subject: format!("{ANONYMOUS_SUBJECT_PREFIX}{caller_address}"),
        }
    }

    /// Username for accounts, synthesized `ANONIP-<addr>` otherwise.
    pub fn subject(&self) -> &str {
        match self {
            Identity::Authenticated(record) => &record.username,
            Identity::Anonymous { subject } => subject,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous { .. })
    }

    pub fn role(&self) -> Role {
        match self {
            Identity::Authenticated(record) => record.role,
            Identity::Anonymous { .. } => Role::Default,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    /// Whether the identity may authenticate by key. Always false for anonymous callers.
    pub fn api_enabled(&self) -> bool {
        match self {
            Identity::Authenticated(record) => record.api_active,
            Identity::Anonymous { .. } => false,
        }
    }

    /// Account-level quota override, if any.
    pub fn quota_override(&self) -> Option<i64> {
        match self {
            Identity::Authenticated(record) => record.api_quota,
            Identity::Anonymous { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(role: Role) -> IdentityRecord {
        IdentityRecord {
            id: 7,
            username: "alice".to_string(),
            api_key_hash: Some("hash".to_string()),
            active: true,
            api_active: true,
            api_quota: Some(100),
            role,
        }
    }

    #[test]
    fn test_role_from_db() {
        assert_eq!(Role::from_db("admin"), Role::Admin);
        assert_eq!(Role::from_db(" ADMIN "), Role::Admin);
        assert_eq!(Role::from_db(""), Role::Default);
        assert_eq!(Role::from_db("default"), Role::Default);
        assert_eq!(Role::from_db("editor"), Role::Default);
    }

    #[test]
    fn test_anonymous_identity() {
        let identity = Identity::anonymous("203.0.113.9");

        assert_eq!(identity.subject(), "ANONIP-203.0.113.9");
        assert!(identity.is_anonymous());
        assert_eq!(identity.role(), Role::Default);
        assert!(!identity.api_enabled());
        assert!(identity.quota_override().is_none());
    }

    #[test]
    fn test_authenticated_identity() {
        let identity = Identity::Authenticated(record(Role::Admin));

        assert_eq!(identity.subject(), "alice");
        assert!(!identity.is_anonymous());
        assert!(identity.is_admin());
        assert!(identity.api_enabled());
        assert_eq!(identity.quota_override(), Some(100));
    }
}
