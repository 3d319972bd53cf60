//! In-memory stores for tests and `--memory` dev mode.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Result, RoleConfigStore, SecretStore, StorageError, UserStore};
use crate::models::{RoleTable, UserRecord};

/// In-memory secret store: name → raw payload.
#[derive(Default)]
pub struct MemorySecretStore {
    secrets: HashMap<String, Vec<u8>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a payload under `name`.
    pub fn with_secret(mut self, name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.secrets.insert(name.into(), payload.into());
        self
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get_secret(&self, name: &str) -> Result<Vec<u8>> {
        self.secrets.get(name).cloned().ok_or(StorageError::NotFound)
    }
}

/// In-memory user store keyed by login.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, bypassing the trait (test setup convenience).
    pub async fn seed(&self, record: UserRecord) {
        self.users.write().await.insert(record.login.clone(), record);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_user(&self, login: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(login).cloned())
    }

    async fn put_user(&self, record: &UserRecord) -> Result<UserRecord> {
        self.users
            .write()
            .await
            .insert(record.login.clone(), record.clone());
        Ok(record.clone())
    }

    async fn delete_user(&self, login: &str) -> Result<()> {
        self.users
            .write()
            .await
            .remove(login)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

/// In-memory role table, cloned on every load.
#[derive(Default)]
pub struct MemoryRoleStore {
    roles: RoleTable,
}

impl MemoryRoleStore {
    pub fn new(roles: RoleTable) -> Self {
        Self { roles }
    }
}

#[async_trait]
impl RoleConfigStore for MemoryRoleStore {
    async fn get_roles(&self) -> Result<RoleTable> {
        Ok(self.roles.clone())
    }
}
