//! User record model.

use serde::{Deserialize, Serialize};

/// A stored user record.
///
/// `password` holds the salted hash, never the plaintext. Serialization
/// skips it so a record can be echoed back to API callers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Primary key.
    pub login: String,
    /// Salted password hash.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub person: Option<String>,
    /// Assigned role names; empty means the implicit `basic` role.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub roles: Vec<String>,
}

impl UserRecord {
    /// Minimal record with just a login.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: None,
            name: None,
            email: None,
            person: None,
            roles: Vec::new(),
        }
    }
}
