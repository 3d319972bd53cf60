//! Shared harness: router over in-memory stores with seeded users/roles.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use tower::ServiceExt;

use tollgate_api::config::ApiConfig;
use tollgate_api::{AppState, router};
use tollgate_core::auth::grant::Granter;
use tollgate_core::auth::password::PasswordHasher;
use tollgate_core::auth::secret::SecretProvider;
use tollgate_core::auth::token::TokenCodec;
use tollgate_core::models::{AccessDetails, RoleTable, UserRecord};
use tollgate_core::store::memory::{MemoryRoleStore, MemorySecretStore, MemoryUserStore};

const SECRET_PAYLOAD: &[u8] = br#"{"signingSecret":"integration-signing","passwordSalt":"integration-salt"}"#;

pub const ADMIN_LOGIN: &str = "usr";
pub const ADMIN_PASSWORD: &str = "rightPassword";
pub const GUEST_LOGIN: &str = "guest";
pub const GUEST_PASSWORD: &str = "guestPassword";

/// Build the router with `usr` (admin role) and `guest` (implicit basic).
pub async fn app() -> Router {
    let secrets = SecretProvider::new(
        Arc::new(MemorySecretStore::new().with_secret("api-secrets", SECRET_PAYLOAD.to_vec())),
        "api-secrets",
    );
    let hasher = PasswordHasher::new(secrets.clone());
    let codec = TokenCodec::new(secrets);

    let users = Arc::new(MemoryUserStore::new());
    let mut admin = UserRecord::new(ADMIN_LOGIN);
    admin.password = Some(hasher.hash(ADMIN_PASSWORD).await.unwrap());
    admin.roles = vec!["admin".to_string()];
    users.seed(admin).await;

    let mut guest = UserRecord::new(GUEST_LOGIN);
    guest.password = Some(hasher.hash(GUEST_PASSWORD).await.unwrap());
    users.seed(guest).await;

    let roles = Arc::new(MemoryRoleStore::new(RoleTable::from([
        (
            "admin".to_string(),
            AccessDetails::from([("users".to_string(), vec!["*".to_string()])]),
        ),
        (
            "basic".to_string(),
            AccessDetails::from([("users".to_string(), vec!["self".to_string()])]),
        ),
    ])));

    let granter = Arc::new(Granter::new(
        users.clone(),
        roles,
        codec.clone(),
        hasher.clone(),
    ));

    let state = AppState {
        users,
        granter,
        codec,
        hasher,
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            pg_connection_url: "postgres://unused".into(),
            secret_name: "api-secrets".into(),
            roles_file: "unused.json".into(),
            auth_ttl_secs: 900,
            exchange_ttl_secs: 3600,
            realm: None,
        },
    };

    router(state)
}

/// Fire a request and return the response.
pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("request")
}

/// Read a response body as JSON.
pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

/// Log in and return `(exchange, auth)` token strings.
pub async fn login(app: &Router, login: &str, password: &str) -> (String, String) {
    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(
            "x-auth-basic",
            tollgate_api::handlers::token::encode_credentials(login, password),
        )
        .body(Body::empty())
        .unwrap();

    let resp = send(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    (
        json["exchange"].as_str().expect("exchange token").to_string(),
        json["auth"].as_str().expect("auth token").to_string(),
    )
}
