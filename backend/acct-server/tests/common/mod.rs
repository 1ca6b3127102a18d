#![allow(dead_code)]

//! Test infrastructure for acct-server API tests

use acct_auth::TokenService;
use acct_db::ProfileRepository;
use acct_identity::InMemoryIdentityProvider;
use acct_server::{AppState, build_router};

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"api-integration-test-secret-0123456789";
pub const PASSWORD: &str = "s3cret!pass";

/// AppState backed by an in-memory database and identity provider
pub async fn create_test_app_state() -> AppState {
    let pool = acct_db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create test database");

    AppState::new(
        Arc::new(ProfileRepository::new(pool)),
        Arc::new(InMemoryIdentityProvider::new()),
        Arc::new(TokenService::with_hs256(TEST_SECRET)),
    )
}

pub async fn create_test_app() -> (Router, AppState) {
    let state = create_test_app_state().await;
    (build_router(state.clone()), state)
}

/// POST a JSON body, optionally with an Authorization header value
pub fn post_json(uri: &str, body: serde_json::Value, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

/// Send a request and decode the JSON reply
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Register an email account and return its uid
pub async fn sign_up(app: &Router, email: &str) -> String {
    let (status, json) = send(
        app,
        post_json(
            "/api/signup",
            serde_json::json!({ "email": email, "password": PASSWORD }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {json}");
    json["uid"].as_str().unwrap().to_string()
}

/// Register and log in, returning (uid, token)
pub async fn sign_up_and_login(app: &Router, email: &str) -> (String, String) {
    let uid = sign_up(app, email).await;
    let (status, json) = send(
        app,
        post_json(
            "/api/login",
            serde_json::json!({ "email_or_phone": email, "password": PASSWORD }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {json}");
    (uid, json["token"].as_str().unwrap().to_string())
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
