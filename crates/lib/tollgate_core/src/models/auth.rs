//! Authentication domain models.
//!
//! These are internal domain models; API crates layer their own
//! request/response shapes on top of them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Access details: access-object name → permitted operation patterns.
///
/// Patterns are regex-like strings (`"read"`, `"self"`, `".*"`, `"*"`).
/// A `BTreeMap` keeps claim serialization deterministic.
pub type AccessDetails = BTreeMap<String, Vec<String>>;

/// Role-definition table: role name → access details granted by the role.
pub type RoleTable = BTreeMap<String, AccessDetails>;

/// A verified caller identity, decoded from a token or minted fresh
/// during a grant flow. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Subject — the user's login.
    pub subject: String,
    /// Optional realm tag.
    pub realm: Option<String>,
    /// Effective access rights at mint time.
    pub access_details: AccessDetails,
}

impl Identity {
    /// Identity with no access claims (exchange tokens carry this).
    pub fn bare(subject: impl Into<String>, realm: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            realm,
            access_details: AccessDetails::new(),
        }
    }
}

/// Structured secret loaded from the secret store.
///
/// Sensitive: never logged, never serialized into responses.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// HMAC signing secret for tokens.
    pub signing_secret: String,
    /// Global password salt.
    pub password_salt: String,
}

// Manual Debug so the secret cannot leak through `{:?}` in logs.
impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("signing_secret", &"<redacted>")
            .field("password_salt", &"<redacted>")
            .finish()
    }
}

/// Claims embedded in signed tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user login (standard `sub` claim).
    pub sub: String,
    /// Realm tag, absent when not configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    /// Access details; empty on exchange tokens.
    #[serde(default)]
    pub acc: AccessDetails,
    /// Issued at (unix timestamp, seconds UTC).
    pub iat: i64,
    /// Expiry (unix timestamp, seconds UTC).
    pub exp: i64,
    /// Random nonce; makes every minted token's signature unique.
    pub jti: String,
}

impl TokenClaims {
    /// Decoded claims viewed as an [`Identity`].
    pub fn into_identity(self) -> Identity {
        Identity {
            subject: self.sub,
            realm: self.realm,
            access_details: self.acc,
        }
    }
}

/// Token pair issued by every grant flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Long-lived, claims-empty token used only to request a fresh pair.
    pub exchange: String,
    /// Short-lived, claims-bearing token used to authorize operations.
    pub auth: String,
}
