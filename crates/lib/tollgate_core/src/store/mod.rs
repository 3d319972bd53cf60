//! Storage seams.
//!
//! The auth core talks to three external stores through these traits:
//! a secret store (signing secret + password salt), a user-record store
//! and a role-definition store. Concrete backends live in submodules;
//! the in-memory ones double as test fixtures.

pub mod file;
pub mod memory;
pub mod pg;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{RoleTable, UserRecord};

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found")]
    NotFound,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Raw secret payloads keyed by name.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the raw secret payload.
    async fn get_secret(&self, name: &str) -> Result<Vec<u8>>;
}

/// User-record storage keyed by login.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user record. `Ok(None)` when the login is unknown.
    async fn get_user(&self, login: &str) -> Result<Option<UserRecord>>;

    /// Create or replace a user record, returning the stored record.
    async fn put_user(&self, record: &UserRecord) -> Result<UserRecord>;

    /// Delete a user record. `NotFound` when the login is unknown.
    async fn delete_user(&self, login: &str) -> Result<()>;
}

/// Externally configured role-definition table.
///
/// Implementations load fresh on every call so role-config updates are
/// visible without a process restart.
#[async_trait]
pub trait RoleConfigStore: Send + Sync {
    /// Load the full role table.
    async fn get_roles(&self) -> Result<RoleTable>;
}
