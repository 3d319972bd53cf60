//! Token-granting flows: password login and exchange-token renewal.
//!
//! Both flows produce a `{exchange, auth}` pair: a claims-empty exchange
//! token that only proves identity for renewal, and a claims-bearing auth
//! token derived from the user's current roles at mint time. No flow
//! writes to storage; every call rotates token values.

use std::sync::Arc;

use tracing::{debug, info};

use super::access::compose_access_details;
use super::password::PasswordHasher;
use super::token::{TokenCodec, TokenKind};
use super::AuthError;
use crate::models::{AccessDetails, Identity, RoleTable, TokenPair, UserRecord};
use crate::store::{RoleConfigStore, StorageError, UserStore};

/// Orchestrates the two token-issuing use cases.
pub struct Granter {
    users: Arc<dyn UserStore>,
    roles: Arc<dyn RoleConfigStore>,
    codec: TokenCodec,
    hasher: PasswordHasher,
    realms: Vec<String>,
}

impl Granter {
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleConfigStore>,
        codec: TokenCodec,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            users,
            roles,
            codec,
            hasher,
            realms: Vec::new(),
        }
    }

    /// Tag minted identities with a realm.
    pub fn with_realms(mut self, realms: Vec<String>) -> Self {
        self.realms = realms;
        self
    }

    /// Password-based login.
    ///
    /// Unknown login, missing stored hash and hash mismatch all collapse
    /// to `BadCredentials` so callers cannot distinguish "user not found"
    /// from "wrong password".
    pub async fn login(
        &self,
        login: &str,
        password: Option<&str>,
    ) -> Result<TokenPair, AuthError> {
        let (user, table) = self.load_user_and_roles(login).await?;

        if let Some(password) = password {
            let stored = user.password.as_deref().ok_or(AuthError::BadCredentials)?;
            if !self.hasher.verify(password, stored).await? {
                debug!(login, "password mismatch");
                return Err(AuthError::BadCredentials);
            }
        }

        let pair = self.mint_pair(&user, &table).await?;
        info!(login, "token pair issued");
        Ok(pair)
    }

    /// Exchange-token renewal.
    ///
    /// The identity must already be verified by the caller (the gateway
    /// layer decodes the exchange token); this flow never verifies a
    /// token itself. Fails with `IdentityRequired` when absent.
    pub async fn exchange(&self, identity: Option<&Identity>) -> Result<TokenPair, AuthError> {
        let identity = identity.ok_or(AuthError::IdentityRequired)?;
        let login = identity.subject.as_str();

        let (user, table) = self.load_user_and_roles(login).await?;
        let pair = self.mint_pair(&user, &table).await?;
        info!(login, "token pair renewed");
        Ok(pair)
    }

    /// Load the user record and role table concurrently.
    ///
    /// Both branches are awaited even when one fails; the user branch
    /// collapses a missing record to `BadCredentials`.
    async fn load_user_and_roles(
        &self,
        login: &str,
    ) -> Result<(UserRecord, RoleTable), AuthError> {
        let (user, table) = tokio::join!(self.users.get_user(login), self.roles.get_roles());

        let user = user
            .map_err(storage_error)?
            .ok_or(AuthError::BadCredentials)?;
        let table = table.map_err(storage_error)?;
        Ok((user, table))
    }

    /// Mint the exchange and auth tokens concurrently; either failure
    /// fails the pair.
    async fn mint_pair(&self, user: &UserRecord, table: &RoleTable) -> Result<TokenPair, AuthError> {
        let claims = compose_access_details(&user.roles, table);
        let (exchange, auth) = tokio::join!(
            self.codec
                .mint(AccessDetails::new(), &user.login, &self.realms, TokenKind::Exchange),
            self.codec
                .mint(claims, &user.login, &self.realms, TokenKind::Auth),
        );
        Ok(TokenPair {
            exchange: exchange?,
            auth: auth?,
        })
    }
}

fn storage_error(e: StorageError) -> AuthError {
    match e {
        // A missing user record is indistinguishable from bad credentials.
        StorageError::NotFound => AuthError::BadCredentials,
        StorageError::Unavailable(msg) => AuthError::StorageUnavailable(msg),
    }
}
