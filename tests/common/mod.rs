// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use finova_dashboard::config::Config;
use finova_dashboard::routes::create_router;
use finova_dashboard::storage::{keys, KeyValueStore, MemoryStore};
use finova_dashboard::{app, AppState};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the token endpoint under `Config::with_backend`.
#[allow(dead_code)]
pub const TOKEN_PATH: &str = "/realms/finova/protocol/openid-connect/token";

/// Router plus handles on the state and both session stores.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub persistent: Arc<MemoryStore>,
    pub transient: Arc<MemoryStore>,
}

/// Create a test app whose identity provider and services all live at `server`.
#[allow(dead_code)]
pub fn create_test_app(server: &MockServer) -> TestApp {
    create_test_app_with(Config::with_backend(&server.uri()))
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> TestApp {
    let persistent = Arc::new(MemoryStore::new());
    let transient = Arc::new(MemoryStore::new());
    let state = Arc::new(
        AppState::new(config, persistent.clone(), transient.clone())
            .expect("Failed to build app state"),
    );

    TestApp {
        router: create_router(state.clone()),
        state,
        persistent,
        transient,
    }
}

/// Mount the user-service endpoints that accept `token` for user 7.
#[allow(dead_code)]
pub async fn mount_user_service(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/auth/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": true })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "userId": 7,
                "username": "jdoe",
                "fullName": "Jane Doe",
                "email": "jane@finova.com",
                "roles": ["USER"]
            }
        })))
        .mount(server)
        .await;
}

/// Store an unexpired token and bootstrap, leaving user 7 signed in.
#[allow(dead_code)]
pub async fn sign_in(app: &TestApp, server: &MockServer) {
    mount_user_service(server).await;
    store_token(app, 60_000);
    app::bootstrap(&app.state, None)
        .await
        .expect("bootstrap with stored token");
    assert!(app.state.auth.is_session_valid());
}

/// Store `test-token` expiring `ttl_ms` from now (negative: already expired).
#[allow(dead_code)]
pub fn store_token(app: &TestApp, ttl_ms: i64) {
    let expiry = chrono::Utc::now().timestamp_millis() + ttl_ms;
    app.persistent.set(keys::ACCESS_TOKEN, "test-token").unwrap();
    app.persistent
        .set(keys::TOKEN_EXPIRY, &expiry.to_string())
        .unwrap();
}

#[allow(dead_code)]
pub async fn get(app: &TestApp, uri: &str) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// POST a urlencoded form.
#[allow(dead_code)]
pub async fn post_form(app: &TestApp, uri: &str, form: &[(&str, &str)]) -> axum::response::Response {
    let body = form
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Render `/` and return the document.
#[allow(dead_code)]
pub async fn page(app: &TestApp) -> String {
    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

#[allow(dead_code)]
pub fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Requests the mock server received whose path starts with `prefix`.
#[allow(dead_code)]
pub async fn requests_to(server: &MockServer, prefix: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path().starts_with(prefix))
        .collect()
}
