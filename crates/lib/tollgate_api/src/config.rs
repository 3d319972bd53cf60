//! API server configuration.

use tollgate_core::auth::secret::DEFAULT_SECRET_NAME;
use tollgate_core::auth::token::{DEFAULT_AUTH_TTL_SECS, DEFAULT_EXCHANGE_TTL_SECS};

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3200").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// Name of the secret holding `{signingSecret, passwordSalt}`.
    pub secret_name: String,
    /// Path to the role-definition JSON file.
    pub roles_file: String,
    /// Auth-token lifetime in seconds.
    pub auth_ttl_secs: i64,
    /// Exchange-token lifetime in seconds.
    pub exchange_ttl_secs: i64,
    /// Realm tag for minted identities; empty means none.
    pub realm: Option<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                 | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `BIND_ADDR`              | `127.0.0.1:3200`                 |
    /// | `DATABASE_URL`           | `postgres://localhost:5432/tollgate` |
    /// | `SECRET_NAME`            | `api-secrets`                    |
    /// | `ROLES_FILE`             | `roles.json`                     |
    /// | `AUTH_TOKEN_TTL_SECS`    | 900 (15 min)                     |
    /// | `EXCHANGE_TOKEN_TTL_SECS`| 2592000 (30 days)                |
    /// | `AUTH_REALM`             | unset                            |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3200".into()),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/tollgate".into()),
            secret_name: std::env::var("SECRET_NAME")
                .unwrap_or_else(|_| DEFAULT_SECRET_NAME.into()),
            roles_file: std::env::var("ROLES_FILE").unwrap_or_else(|_| "roles.json".into()),
            auth_ttl_secs: env_i64("AUTH_TOKEN_TTL_SECS", DEFAULT_AUTH_TTL_SECS),
            exchange_ttl_secs: env_i64("EXCHANGE_TOKEN_TTL_SECS", DEFAULT_EXCHANGE_TTL_SECS),
            realm: std::env::var("AUTH_REALM").ok().filter(|r| !r.is_empty()),
        }
    }

    /// Realms list for the granter (first entry wins at mint time).
    pub fn realms(&self) -> Vec<String> {
        self.realm.clone().into_iter().collect()
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
