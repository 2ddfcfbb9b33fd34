// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, session restore and logout against a mock identity provider.

mod common;

use axum::http::StatusCode;
use common::*;
use finova_dashboard::app;
use finova_dashboard::services::AuthState;
use finova_dashboard::storage::{keys, KeyValueStore};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_full_login_flow() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    mount_user_service(&server).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code-1"))
        .and(body_string_contains("client_id=finova-frontend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-abc",
            "refresh_token": "refresh-xyz",
            "expires_in": 300,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(&app, "/login").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let provider_url = location(&response);
    assert!(provider_url.starts_with(&format!("{}/realms/finova/protocol/openid-connect/auth?", server.uri())));
    let state = provider_url
        .split("state=")
        .nth(1)
        .expect("authorization URL carries a state")
        .to_string();
    assert_eq!(app.transient.get(keys::OAUTH_STATE), Some(state.clone()));

    let response = get(&app, &format!("/callback?code=auth-code-1&state={}", state)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    assert_eq!(app.state.auth.auth_state(), AuthState::Authenticated);
    assert_eq!(app.persistent.get(keys::ACCESS_TOKEN).as_deref(), Some("access-abc"));
    assert_eq!(app.persistent.get(keys::REFRESH_TOKEN).as_deref(), Some("refresh-xyz"));
    assert!(app.persistent.get(keys::USER_INFO).unwrap().contains("Jane Doe"));
    assert!(app.transient.get(keys::OAUTH_STATE).is_none());

    let html = page(&app).await;
    assert!(html.contains("Welcome, Jane Doe"));
    assert!(html.contains("href=\"/section/accounts\""));
    // Dashboard service is not mocked, so the fallback figures show.
    assert!(html.contains("$106,965.67"));
}

#[tokio::test]
async fn test_state_mismatch_makes_no_requests() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    app.transient.set(keys::OAUTH_STATE, "expected-state").unwrap();

    let response = get(&app, "/callback?code=abc&state=forged-state").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(!app.state.auth.is_session_valid());

    let html = page(&app).await;
    assert!(html.contains("Authentication failed: Invalid state parameter"));
    assert!(html.contains("login-section"));
}

#[tokio::test]
async fn test_missing_state_is_rejected() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    app.transient.set(keys::OAUTH_STATE, "expected-state").unwrap();

    get(&app, "/callback?code=abc").await;

    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(app.state.auth.auth_state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_failed_exchange_leaves_no_session() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
        .mount(&server)
        .await;

    let response = get(&app, "/login").await;
    let state = location(&response).split("state=").nth(1).unwrap().to_string();
    get(&app, &format!("/callback?code=stale&state={}", state)).await;

    assert!(app.persistent.get(keys::ACCESS_TOKEN).is_none());
    assert_eq!(app.state.auth.auth_state(), AuthState::Unauthenticated);
    let html = page(&app).await;
    assert!(html.contains("Authentication failed: Token exchange failed"));
}

#[tokio::test]
async fn test_oversized_token_lifetime_is_rejected() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    mount_user_service(&server).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t",
            "expires_in": 9_223_372_036_854_775_i64
        })))
        .mount(&server)
        .await;

    let response = get(&app, "/login").await;
    let state = location(&response).split("state=").nth(1).unwrap().to_string();
    let response = get(&app, &format!("/callback?code=abc&state={}", state)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert!(app.persistent.get(keys::ACCESS_TOKEN).is_none());
    assert!(app.persistent.get(keys::TOKEN_EXPIRY).is_none());
    assert!(requests_to(&server, "/api/auth/me").await.is_empty());
    let html = page(&app).await;
    assert!(html.contains("Authentication failed: Token exchange failed"));
}

#[tokio::test]
async fn test_provider_error_is_shown() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let response = get(&app, "/callback?error=access_denied").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = page(&app).await;
    assert!(html.contains("Login failed: access_denied"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stored_session_is_restored() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("GET"))
        .and(path("/api/auth/validate"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": true })))
        .expect(1)
        .mount(&server)
        .await;
    sign_in(&app, &server).await;

    assert_eq!(app.state.auth.user_id(), "7");
    let html = page(&app).await;
    assert!(html.contains("Welcome, Jane Doe"));
}

#[tokio::test]
async fn test_expired_token_is_not_used() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    mount_user_service(&server).await;
    store_token(&app, -1_000);

    let outcome = app::bootstrap(&app.state, None).await.unwrap();

    assert_eq!(outcome, AuthState::Unauthenticated);
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(page(&app).await.contains("login-section"));
}

#[tokio::test]
async fn test_expired_token_invalidates_cached_user() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;

    let past = chrono::Utc::now().timestamp_millis() - 1;
    app.persistent
        .set(keys::TOKEN_EXPIRY, &past.to_string())
        .unwrap();

    assert!(app.state.auth.current_user().is_some());
    assert!(!app.state.auth.is_session_valid());
    let response = get(&app, "/section/accounts").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_rejected_token_falls_back_to_login() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("GET"))
        .and(path("/api/auth/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": false })))
        .mount(&server)
        .await;
    store_token(&app, 60_000);

    let outcome = app::bootstrap(&app.state, None).await.unwrap();

    assert_eq!(outcome, AuthState::Unauthenticated);
    assert!(requests_to(&server, "/api/auth/me").await.is_empty());
    assert!(requests_to(&server, "/api/dashboard").await.is_empty());
}

#[tokio::test]
async fn test_backend_401_ends_session() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;
    Mock::given(method("GET"))
        .and(path("/api/accounts/user/7"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let response = get(&app, "/section/accounts").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    for key in keys::SESSION {
        assert!(app.persistent.get(key).is_none(), "{} should be cleared", key);
    }
    let html = page(&app).await;
    assert!(html.contains("Your session has expired. Please log in again."));
    assert!(!html.contains("href=\"/section/"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;

    let response = post_form(&app, "/logout", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    for key in keys::SESSION {
        assert!(app.persistent.get(key).is_none());
    }
    assert!(!app.state.auth.is_session_valid());
    assert!(page(&app).await.contains("Login with Single Sign-On"));

    let response = get(&app, "/section/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
