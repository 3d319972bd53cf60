//! Lazily loaded, cached signing secret.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::AuthError;
use crate::models::Secret;
use crate::store::{SecretStore, StorageError};

/// Default secret name looked up in the secret store.
pub const DEFAULT_SECRET_NAME: &str = "api-secrets";

struct Inner {
    store: Arc<dyn SecretStore>,
    name: String,
    cache: RwLock<Option<Secret>>,
}

/// Fetches and caches the structured secret `{signingSecret, passwordSalt}`.
///
/// A single in-memory slot is filled on first successful load; later calls
/// return the cached value without a round trip. A race on first load may
/// fetch twice, the last write wins. The slot persists until the process
/// restarts or [`SecretProvider::invalidate`] is called.
#[derive(Clone)]
pub struct SecretProvider {
    inner: Arc<Inner>,
}

impl SecretProvider {
    pub fn new(store: Arc<dyn SecretStore>, name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                name: name.into(),
                cache: RwLock::new(None),
            }),
        }
    }

    /// Load the secret, from cache when already filled.
    ///
    /// `SecretUnavailable` when the store fails or knows no such secret,
    /// `MalformedSecret` when the payload does not parse.
    pub async fn load(&self) -> Result<Secret, AuthError> {
        if let Some(secret) = self.inner.cache.read().await.as_ref() {
            return Ok(secret.clone());
        }

        let raw = self
            .inner
            .store
            .get_secret(&self.inner.name)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => {
                    AuthError::SecretUnavailable(format!("secret '{}' not found", self.inner.name))
                }
                StorageError::Unavailable(msg) => AuthError::SecretUnavailable(msg),
            })?;

        let secret: Secret =
            serde_json::from_slice(&raw).map_err(|e| AuthError::MalformedSecret(e.to_string()))?;

        *self.inner.cache.write().await = Some(secret.clone());
        info!(name = %self.inner.name, "secret loaded and cached");
        Ok(secret)
    }

    /// Drop the cached value; the next [`load`](Self::load) refetches.
    pub async fn invalidate(&self) {
        *self.inner.cache.write().await = None;
        info!(name = %self.inner.name, "secret cache invalidated");
    }
}
