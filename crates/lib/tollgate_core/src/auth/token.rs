//! Signed, time-bound token encoding and verification.
//!
//! Tokens are HS256 JWTs carrying `{sub, realm, acc, iat, exp, jti}`.
//! The signing secret comes from the [`SecretProvider`]; signature
//! comparison is constant-time inside `jsonwebtoken`'s HMAC verify.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};

use super::AuthError;
use super::secret::SecretProvider;
use crate::models::{AccessDetails, Identity, TokenClaims};

/// Default auth-token lifetime: 15 minutes.
pub const DEFAULT_AUTH_TTL_SECS: i64 = 15 * 60;

/// Default exchange-token lifetime: 30 days.
pub const DEFAULT_EXCHANGE_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Which half of the token pair is being minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Long-lived, claims-empty; only proves identity for renewal.
    Exchange,
    /// Short-lived, claims-bearing; authorizes resource operations.
    Auth,
}

/// Encodes and verifies signed tokens.
#[derive(Clone)]
pub struct TokenCodec {
    secrets: SecretProvider,
    auth_ttl: Duration,
    exchange_ttl: Duration,
}

impl TokenCodec {
    pub fn new(secrets: SecretProvider) -> Self {
        Self {
            secrets,
            auth_ttl: Duration::seconds(DEFAULT_AUTH_TTL_SECS),
            exchange_ttl: Duration::seconds(DEFAULT_EXCHANGE_TTL_SECS),
        }
    }

    /// Override both token lifetimes.
    pub fn with_ttls(mut self, auth_ttl_secs: i64, exchange_ttl_secs: i64) -> Self {
        self.auth_ttl = Duration::seconds(auth_ttl_secs);
        self.exchange_ttl = Duration::seconds(exchange_ttl_secs);
        self
    }

    /// Mint a signed token embedding `subject`, the first of `realms`
    /// (if any) and `claims`, with the lifetime configured for `kind`.
    ///
    /// Fails with `SecretUnavailable`/`MalformedSecret` when the signing
    /// secret cannot be loaded. A random `jti` keeps signatures distinct
    /// across mints even with identical timestamps and claims.
    pub async fn mint(
        &self,
        claims: AccessDetails,
        subject: &str,
        realms: &[String],
        kind: TokenKind,
    ) -> Result<String, AuthError> {
        let ttl = match kind {
            TokenKind::Exchange => self.exchange_ttl,
            TokenKind::Auth => self.auth_ttl,
        };
        self.mint_with_ttl(claims, subject, realms, ttl).await
    }

    async fn mint_with_ttl(
        &self,
        claims: AccessDetails,
        subject: &str,
        realms: &[String],
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let secret = self.secrets.load().await?;
        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject.to_string(),
            realm: realms.first().cloned(),
            acc: claims,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: nonce(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.signing_secret.as_bytes()),
        )
        .map_err(|e| AuthError::MalformedToken(format!("encode: {e}")))
    }

    /// Verify a token and return the decoded identity.
    ///
    /// `InvalidToken` when the signature does not match, `ExpiredToken`
    /// past expiry (zero leeway), `MalformedToken` when the string cannot
    /// be parsed into the expected structure.
    pub async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let secret = self.secrets.load().await?;
        let key = DecodingKey::from_secret(secret.signing_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<TokenClaims>(token, &key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            ErrorKind::InvalidSignature => AuthError::InvalidToken,
            _ => AuthError::MalformedToken(e.to_string()),
        })?;

        Ok(data.claims.into_identity())
    }
}

/// Random alphanumeric token nonce.
fn nonce() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
