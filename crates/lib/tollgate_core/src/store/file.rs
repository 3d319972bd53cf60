//! File-backed secret and role-definition stores.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{Result, RoleConfigStore, SecretStore, StorageError};
use crate::models::RoleTable;

/// Secret store reading raw payloads from files under a base directory.
///
/// The secret name maps to `<base>/<name>.json`.
pub struct FileSecretStore {
    base: PathBuf,
}

impl FileSecretStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Default base under the platform data directory.
    pub fn default_base() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tollgate")
            .join("secrets")
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get_secret(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.base.join(format!("{name}.json"));
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }
}

/// Role-definition store backed by a single JSON file.
///
/// Re-reads the file on every call so role-config edits take effect
/// without a restart.
pub struct FileRoleStore {
    path: PathBuf,
}

impl FileRoleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RoleConfigStore for FileRoleStore {
    async fn get_roles(&self) -> Result<RoleTable> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound
            } else {
                StorageError::Unavailable(e.to_string())
            }
        })?;
        serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Unavailable(format!("role table parse: {e}")))
    }
}
