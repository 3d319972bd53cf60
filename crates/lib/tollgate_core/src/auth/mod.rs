//! Authentication and authorization core.
//!
//! Issuance and verification of signed token pairs, password hash
//! verification against a lazily loaded secret, and composition of a
//! caller's access rights from role definitions.

pub mod access;
pub mod grant;
pub mod password;
pub mod secret;
pub mod token;

use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Secret unavailable: {0}")]
    SecretUnavailable(String),

    #[error("Malformed secret: {0}")]
    MalformedSecret(String),

    #[error("Invalid token signature")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Identity is not provided")]
    IdentityRequired,

    #[error("Invalid credentials")]
    BadCredentials,

    #[error("Action is not permitted: {action} on {object}")]
    ActionNotPermitted { object: String, action: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}
