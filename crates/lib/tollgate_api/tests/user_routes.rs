//! User CRUD routes: access decisions, self shortcut, response shapes.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};

use common::{
    ADMIN_LOGIN, ADMIN_PASSWORD, GUEST_LOGIN, GUEST_PASSWORD, app, body_json, login, send,
};

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-auth-token", token)
        .body(Body::empty())
        .unwrap()
}

fn with_body(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-auth-token", token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn read_without_token_is_unauthorized() {
    let app = app().await;
    let req = Request::builder()
        .method("GET")
        .uri("/users/usr")
        .body(Body::empty())
        .unwrap();
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(resp).await;
    assert_eq!(json["message"], "x-auth-token header missing");
}

#[tokio::test]
async fn admin_reads_any_user_without_password_leak() {
    let app = app().await;
    let (_, auth) = login(&app, ADMIN_LOGIN, ADMIN_PASSWORD).await;

    let resp = send(&app, get("/users/guest", &auth)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["login"], "guest");
    assert!(json.get("password").is_none(), "hash must never surface");
}

#[tokio::test]
async fn exchange_token_grants_no_resource_access() {
    let app = app().await;
    let (exchange, _) = login(&app, ADMIN_LOGIN, ADMIN_PASSWORD).await;

    // The exchange token carries no access claims, so even the holder's
    // own record is out of reach.
    let resp = send(&app, get(&format!("/users/{ADMIN_LOGIN}"), &exchange)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let json = body_json(resp).await;
    assert_eq!(json["errors"][0]["object"], "users");
    assert_eq!(json["errors"][0]["action"], "read");
}

#[tokio::test]
async fn self_only_caller_reads_own_record_but_not_others() {
    let app = app().await;
    let (_, auth) = login(&app, GUEST_LOGIN, GUEST_PASSWORD).await;

    let own = send(&app, get("/users/guest", &auth)).await;
    assert_eq!(own.status(), StatusCode::OK);

    let other = send(&app, get("/users/usr", &auth)).await;
    assert_eq!(other.status(), StatusCode::FORBIDDEN);

    let json = body_json(other).await;
    assert_eq!(json["errors"][0]["object"], "users");
    assert_eq!(json["errors"][0]["action"], "read");
    assert_eq!(json["errors"][0]["isAuthError"], true);
}

#[tokio::test]
async fn admin_creates_a_user_who_can_then_log_in() {
    let app = app().await;
    let (_, auth) = login(&app, ADMIN_LOGIN, ADMIN_PASSWORD).await;

    let resp = send(
        &app,
        with_body(
            "POST",
            "/users",
            &auth,
            serde_json::json!({
                "login": "newbie",
                "password": "newbiePassword",
                "name": "New User"
            }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = body_json(resp).await;
    assert_eq!(json["login"], "newbie");
    assert!(json.get("password").is_none());

    // The hash written at creation verifies at login time.
    let (exchange, auth) = login(&app, "newbie", "newbiePassword").await;
    assert!(!exchange.is_empty());
    assert!(!auth.is_empty());
}

#[tokio::test]
async fn self_only_caller_cannot_create_other_users() {
    let app = app().await;
    let (_, auth) = login(&app, GUEST_LOGIN, GUEST_PASSWORD).await;

    let resp = send(
        &app,
        with_body(
            "POST",
            "/users",
            &auth,
            serde_json::json!({"login": "intruder", "password": "pw"}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn patch_updates_only_the_provided_fields() {
    let app = app().await;
    let (_, auth) = login(&app, ADMIN_LOGIN, ADMIN_PASSWORD).await;

    let resp = send(
        &app,
        with_body(
            "PATCH",
            "/users/guest",
            &auth,
            serde_json::json!({"name": "Renamed"}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["name"], "Renamed");

    // Password untouched by the patch: the old one still logs in.
    login(&app, GUEST_LOGIN, GUEST_PASSWORD).await;
}

#[tokio::test]
async fn replace_without_password_keeps_the_stored_hash() {
    let app = app().await;
    let (_, auth) = login(&app, ADMIN_LOGIN, ADMIN_PASSWORD).await;

    let resp = send(
        &app,
        with_body(
            "PUT",
            "/users/guest",
            &auth,
            serde_json::json!({"name": "Replaced"}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    login(&app, GUEST_LOGIN, GUEST_PASSWORD).await;
}

#[tokio::test]
async fn delete_then_read_is_not_found() {
    let app = app().await;
    let (_, auth) = login(&app, ADMIN_LOGIN, ADMIN_PASSWORD).await;

    let del = Request::builder()
        .method("DELETE")
        .uri("/users/guest")
        .header("x-auth-token", &auth)
        .body(Body::empty())
        .unwrap();
    let resp = send(&app, del).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, get("/users/guest", &auth)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_user_read_is_not_found() {
    let app = app().await;
    let (_, auth) = login(&app, ADMIN_LOGIN, ADMIN_PASSWORD).await;

    let resp = send(&app, get("/users/ghost", &auth)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
