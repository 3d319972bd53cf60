//! Password hashing against the shared salt.
//!
//! SHA-256 over `plaintext || salt` with the single salt carried in the
//! secret payload. Deterministic by contract: equal `(plaintext, salt)`
//! pairs always produce equal digests, so creation-time hashes stay
//! comparable at login time. With one global salt this is closer to a
//! keyed digest than a per-user salted hash; the trade-off is recorded
//! in DESIGN.md.

use sha2::{Digest, Sha256};

use super::AuthError;
use super::secret::SecretProvider;

/// Derives salted password hashes via the cached secret.
#[derive(Clone)]
pub struct PasswordHasher {
    secrets: SecretProvider,
}

impl PasswordHasher {
    pub fn new(secrets: SecretProvider) -> Self {
        Self { secrets }
    }

    /// Hash a plaintext password, lowercase hex digest.
    ///
    /// Propagates `SecretUnavailable`/`MalformedSecret` when the salt
    /// cannot be obtained.
    pub async fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let secret = self.secrets.load().await?;
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        hasher.update(secret.password_salt.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Compare a plaintext against a stored digest.
    pub async fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, AuthError> {
        Ok(self.hash(plaintext).await? == stored_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemorySecretStore;

    use std::sync::Arc;

    fn hasher_with_salt(salt: &str) -> PasswordHasher {
        let payload = format!(r#"{{"signingSecret":"sig","passwordSalt":"{salt}"}}"#);
        let store = Arc::new(
            MemorySecretStore::new().with_secret("api-secrets", payload.into_bytes()),
        );
        PasswordHasher::new(SecretProvider::new(store, "api-secrets"))
    }

    #[tokio::test]
    async fn deterministic_for_equal_inputs() {
        let hasher = hasher_with_salt("s1");
        let a = hasher.hash("pw").await.unwrap();
        let b = hasher.hash("pw").await.unwrap();
        assert_eq!(a, b);
        assert!(hasher.verify("pw", &a).await.unwrap());
        assert!(!hasher.verify("other", &a).await.unwrap());
    }

    #[tokio::test]
    async fn salt_changes_the_digest() {
        let a = hasher_with_salt("s1").hash("pw").await.unwrap();
        let b = hasher_with_salt("s2").hash("pw").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn missing_secret_propagates() {
        let store = Arc::new(MemorySecretStore::new());
        let hasher = PasswordHasher::new(SecretProvider::new(store, "api-secrets"));
        assert!(matches!(
            hasher.hash("pw").await,
            Err(AuthError::SecretUnavailable(_))
        ));
    }
}
