#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use petstore_api::auth::jwt::JwtConfig;
use petstore_api::config::ServerConfig;
use petstore_api::router::build_app_router;
use petstore_api::state::AppState;

/// Password shared by every account created through [`create_user_and_login`].
pub const TEST_PASSWORD: &str = "secret!pw";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_days: 7,
        },
    }
}

/// Full application router over `pool`, with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn with_token(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_auth(app, uri, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let request = with_token(Request::builder().method(Method::GET).uri(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let request = with_token(Request::builder().method(method).uri(uri), token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, Some(token), body).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, Some(token), body).await
}

pub async fn post_form_auth(app: Router, uri: &str, token: &str, form: &str) -> Response<Body> {
    let request = with_token(Request::builder().method(Method::POST).uri(uri), Some(token))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

/// Multipart body with a single `file` field.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    token: &str,
    file_name: &str,
    contents: &[u8],
) -> Response<Body> {
    let boundary = "petstore-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = with_token(Request::builder().method(Method::POST).uri(uri), Some(token))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let request = with_token(Request::builder().method(Method::DELETE).uri(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

pub fn user_body(username: &str) -> Value {
    json!({
        "username": username,
        "firstName": "Test",
        "lastName": "User",
        "email": format!("{username}@example.com"),
        "password": TEST_PASSWORD,
        "phone": "+14155552671",
    })
}

/// Register `username` through the API and return a session token.
pub async fn create_user_and_login(pool: &PgPool, username: &str) -> String {
    let response = post_json(build_test_app(pool.clone()), "/user", user_body(username)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(
        build_test_app(pool.clone()),
        &format!("/user/login?username={username}&password={TEST_PASSWORD}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}
