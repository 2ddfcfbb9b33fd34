// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routing, session gating and navigation of the dashboard shell.

mod common;

use axum::http::{header, StatusCode};
use common::*;
use finova_dashboard::render::Section;

#[tokio::test]
async fn test_unauthenticated_index_shows_login() {
    let server = wiremock::MockServer::start().await;
    let app = create_test_app(&server);

    let html = page(&app).await;

    assert!(html.contains("login-section"));
    assert!(html.contains("Login with SSO"));
    assert!(!html.contains("href=\"/section/"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_protected_routes_redirect_without_session() {
    let server = wiremock::MockServer::start().await;
    let app = create_test_app(&server);

    for uri in ["/section/accounts", "/tabs/planning/calculator", "/modals/add-account", "/analytics?period=3m"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), "/");
    }
    let response = post_form(&app, "/payments/pause", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_redirects_to_provider() {
    let server = wiremock::MockServer::start().await;
    let app = create_test_app(&server);

    let response = get(&app, "/login").await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let url = location(&response);
    assert!(url.contains("/realms/finova/protocol/openid-connect/auth?"));
    assert!(url.contains("response_type=code"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = wiremock::MockServer::start().await;
    let app = create_test_app(&server);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["authenticated"], false);
    assert!(body["build_id"].is_string());
}

#[tokio::test]
async fn test_security_headers_on_pages() {
    let server = wiremock::MockServer::start().await;
    let app = create_test_app(&server);

    let response = get(&app, "/").await;
    let headers = response.headers();

    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    assert!(headers
        .get(header::CONTENT_SECURITY_POLICY)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("frame-ancestors 'none'"));
}

#[tokio::test]
async fn test_navigation_after_sign_in() {
    let server = wiremock::MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;

    let response = get(&app, "/section/planning").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("id=\"planning-section\""));
    assert!(html.contains("Balanced Growth"));

    let html = body_text(get(&app, "/tabs/planning/calculator").await).await;
    assert!(html.contains("action=\"/calculators/retirement\""));

    let html = body_text(get(&app, "/modals/add-account").await).await;
    assert!(html.contains("Add Retirement Account"));
    assert_eq!(app.state.page.read().await.section(), Section::Accounts);

    let html = body_text(get(&app, "/modals/close").await).await;
    assert!(!html.contains("role=\"dialog\""));
}

#[tokio::test]
async fn test_unknown_names_are_not_found() {
    let server = wiremock::MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;

    assert_eq!(get(&app, "/section/nope").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/tabs/planning/nope").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/modals/nope").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notice_shows_once() {
    let server = wiremock::MockServer::start().await;
    let app = create_test_app(&server);

    get(&app, "/callback?error=access_denied").await;

    assert!(page(&app).await.contains("Login failed: access_denied"));
    assert!(!page(&app).await.contains("Login failed"));
}
