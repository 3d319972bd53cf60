//! Tollgate API server binary.
//!
//! Wires stores, the auth core and the axum router together. `--memory`
//! runs entirely on in-memory stores with a seeded role table, which is
//! handy for local development without PostgreSQL.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use tollgate_api::config::ApiConfig;
use tollgate_api::{AppState, router};
use tollgate_core::auth::grant::Granter;
use tollgate_core::auth::password::PasswordHasher;
use tollgate_core::auth::secret::SecretProvider;
use tollgate_core::auth::token::TokenCodec;
use tollgate_core::models::{AccessDetails, RoleTable};
use tollgate_core::store::file::{FileRoleStore, FileSecretStore};
use tollgate_core::store::memory::{MemoryRoleStore, MemorySecretStore, MemoryUserStore};
use tollgate_core::store::pg::PgUserStore;
use tollgate_core::store::{RoleConfigStore, SecretStore, UserStore};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "tollgate_server", about = "Tollgate API server")]
struct Args {
    /// Address to bind (overrides BIND_ADDR).
    #[arg(long)]
    bind: Option<String>,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/tollgate"
    )]
    database_url: String,

    /// Directory holding secret JSON files.
    #[arg(long, env = "SECRETS_DIR")]
    secrets_dir: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Run on in-memory stores (no PostgreSQL, seeded roles).
    #[arg(long, default_value_t = false)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tollgate_api=debug,tollgate_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    let mut config = ApiConfig::from_env();
    if let Some(bind) = args.bind.clone() {
        config.bind_addr = bind;
    }
    config.pg_connection_url = args.database_url.clone();

    let (users, roles, secrets): (
        Arc<dyn UserStore>,
        Arc<dyn RoleConfigStore>,
        Arc<dyn SecretStore>,
    ) = if args.memory {
        info!("running on in-memory stores");
        (
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryRoleStore::new(dev_role_table())),
            Arc::new(MemorySecretStore::new().with_secret(
                &config.secret_name,
                serde_json::json!({
                    "signingSecret": "dev-signing-secret",
                    "passwordSalt": "dev-password-salt"
                })
                .to_string()
                .into_bytes(),
            )),
        )
    } else {
        info!(database_url = %config.pg_connection_url, "connecting to PostgreSQL");
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .connect(&config.pg_connection_url)
            .await?;
        tollgate_core::migrate::migrate(&pool).await?;

        let secrets_base = args
            .secrets_dir
            .clone()
            .map(Into::into)
            .unwrap_or_else(FileSecretStore::default_base);
        (
            Arc::new(PgUserStore::new(pool)),
            Arc::new(FileRoleStore::new(&config.roles_file)),
            Arc::new(FileSecretStore::new(secrets_base)),
        )
    };

    let provider = SecretProvider::new(secrets, config.secret_name.clone());
    let hasher = PasswordHasher::new(provider.clone());
    let codec = TokenCodec::new(provider).with_ttls(config.auth_ttl_secs, config.exchange_ttl_secs);
    let granter = Arc::new(
        Granter::new(users.clone(), roles, codec.clone(), hasher.clone())
            .with_realms(config.realms()),
    );

    let state = AppState {
        users,
        granter,
        codec,
        hasher,
        config: config.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}

/// Role table seeded in `--memory` mode.
fn dev_role_table() -> RoleTable {
    RoleTable::from([
        (
            "admin".to_string(),
            AccessDetails::from([("users".to_string(), vec!["*".to_string()])]),
        ),
        (
            "basic".to_string(),
            AccessDetails::from([("users".to_string(), vec!["self".to_string()])]),
        ),
    ])
}
