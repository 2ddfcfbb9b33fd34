// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Section loads and form submissions through the shell routes.

mod common;

use axum::http::StatusCode;
use common::*;
use finova_dashboard::render::{Region, ACCOUNT_FORM};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_dashboard_from_service() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("GET"))
        .and(path("/api/dashboard/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "primaryAccount": { "estimatedMonthlyIncome": 7100.0, "currentBalance": 120500.0 },
            "status": "Ahead of schedule"
        })))
        .mount(&server)
        .await;
    sign_in(&app, &server).await;

    let html = page(&app).await;
    assert!(html.contains("$7,100"));
    assert!(html.contains("$120,500"));
    assert!(html.contains("Ahead of schedule"));
}

#[tokio::test]
async fn test_dashboard_fallback_when_service_down() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("GET"))
        .and(path("/api/dashboard/7"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    sign_in(&app, &server).await;

    let html = page(&app).await;
    assert!(html.contains("$6,965"));
    assert!(html.contains("$106,965.67"));
    assert!(html.contains("You are on track! ✓"));
}

#[tokio::test]
async fn test_partial_dashboard_is_healed() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("GET"))
        .and(path("/api/dashboard/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Behind" })))
        .mount(&server)
        .await;
    sign_in(&app, &server).await;

    let page_state = app.state.page.read().await;
    assert_eq!(page_state.region(Region::MonthlyIncome), Some("$6,965"));
    assert_eq!(page_state.region(Region::RetirementStatus), Some("Behind"));
}

#[tokio::test]
async fn test_accounts_with_no_data_show_samples() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("GET"))
        .and(path("/api/accounts/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    sign_in(&app, &server).await;

    let response = get(&app, "/section/accounts").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert!(html.contains("401(a) Plan"));
    assert!(html.contains("$975"));
    assert!(html.contains("$106,965"));
}

#[tokio::test]
async fn test_accounts_render_live_data() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("GET"))
        .and(path("/api/accounts/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "accountName": "Roth IRA", "accountType": "ROTH_IRA", "currentBalance": 52310.0, "onTrack": false }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contributions/user/7/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalMonthlyFormatted": "$1,200",
            "totalAnnualFormatted": "$14,400"
        })))
        .mount(&server)
        .await;
    sign_in(&app, &server).await;

    let html = body_text(get(&app, "/section/accounts").await).await;
    assert!(html.contains("Roth IRA"));
    assert!(html.contains("$52,310"));
    assert!(html.contains("Behind Schedule"));
    assert!(html.contains("$14,400"));

    let html = body_text(get(&app, "/tabs/account/manage-accounts").await).await;
    assert!(html.contains("Employer: N/A"));
}

#[tokio::test]
async fn test_invalid_account_is_not_submitted() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;
    get(&app, "/modals/add-account").await;

    let response = post_form(
        &app,
        "/accounts",
        &[("accountName", ""), ("accountType", "401K"), ("currentBalance", "-5")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert!(requests_to(&server, "/api/accounts").await.is_empty());
    {
        let page_state = app.state.page.read().await;
        let form = page_state.form(ACCOUNT_FORM).expect("rejected form kept");
        assert!(form.errors.contains_key("accountName"));
        assert!(form.errors.contains_key("currentBalance"));
        assert_eq!(form.values["accountType"], "401K");
    }

    let html = page(&app).await;
    assert!(html.contains("role=\"dialog\""));
    assert!(html.contains("data-field=\"accountName\""));
    assert!(html.contains("data-field=\"currentBalance\""));
}

#[tokio::test]
async fn test_valid_account_is_created() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("POST"))
        .and(path("/api/accounts"))
        .and(body_partial_json(json!({
            "userId": "7",
            "accountName": "Rollover IRA",
            "accountType": "IRA",
            "currentBalance": 2500.5
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    sign_in(&app, &server).await;
    get(&app, "/modals/add-account").await;

    post_form(
        &app,
        "/accounts",
        &[("accountName", "Rollover IRA"), ("accountType", "IRA"), ("currentBalance", "2500.50")],
    )
    .await;

    let html = page(&app).await;
    assert!(html.contains("Account created successfully!"));
    assert!(!html.contains("role=\"dialog\""));
    assert!(app.state.page.read().await.form(ACCOUNT_FORM).is_none());
    // The section reloads after a successful create.
    assert!(!requests_to(&server, "/api/accounts/user/7").await.is_empty());
}

#[tokio::test]
async fn test_failed_contribution_create_reports_error() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("POST"))
        .and(path("/api/contributions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    sign_in(&app, &server).await;
    get(&app, "/modals/add-contribution").await;

    post_form(
        &app,
        "/contributions",
        &[("contributionType", "ROTH"), ("monthlyAmount", "300")],
    )
    .await;

    let html = page(&app).await;
    assert!(html.contains("Failed to create contribution. Please try again."));
    assert!(html.contains("role=\"dialog\""));
}

#[tokio::test]
async fn test_scenarios_fall_back_when_unavailable() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;
    get(&app, "/section/planning").await;

    let response = post_form(&app, "/planning/scenarios", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = page(&app).await;
    assert!(html.contains("Current Scenario"));
    assert!(html.contains("Increase contributions by 20%"));
    assert!(html.contains("$2,150,000"));
    assert!(html.contains("Retire at age 67"));
}

#[tokio::test]
async fn test_retirement_calculator() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;
    get(&app, "/tabs/planning/calculator").await;
    let before = server.received_requests().await.unwrap().len();

    post_form(
        &app,
        "/calculators/retirement",
        &[
            ("currentAge", "30"),
            ("retirementAge", "65"),
            ("currentBalance", "50000"),
            ("monthlyContribution", "500"),
            ("annualReturn", "7"),
        ],
    )
    .await;

    let html = page(&app).await;
    assert!(html.contains("Years to Retirement:</strong> 35"));
    assert!(html.contains("On Track ✓"));
    assert!(html.contains("value=\"50000\""));
    assert_eq!(server.received_requests().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_retirement_calculator_rejects_ages() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;
    get(&app, "/tabs/planning/calculator").await;

    post_form(
        &app,
        "/calculators/retirement",
        &[
            ("currentAge", "66"),
            ("retirementAge", "60"),
            ("currentBalance", "50000"),
            ("monthlyContribution", "500"),
            ("annualReturn", "7"),
        ],
    )
    .await;

    let html = page(&app).await;
    assert!(html.contains("Retirement age must be greater than current age"));
    assert!(!html.contains("Years to Retirement"));
}

#[tokio::test]
async fn test_social_security_estimate() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;
    get(&app, "/tabs/planning/social-security").await;

    post_form(
        &app,
        "/calculators/social-security",
        &[("annualIncome", "60000"), ("yearsWorked", "35")],
    )
    .await;

    // 60,000 * 0.4 / 12 = 2,000 at full retirement age.
    let html = page(&app).await;
    assert!(html.contains("$1,500/month"));
    assert!(html.contains("$2,000/month"));
    assert!(html.contains("$2,480/month"));
}

#[tokio::test]
async fn test_analytics_period_is_sent() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    Mock::given(method("GET"))
        .and(path("/api/analytics/dashboard/7"))
        .and(query_param("period", "3m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keyStats": {
                "totalAssets": 250000.0,
                "totalAssetsTrend": "up",
                "trendPercentage": 4.5,
                "onTrackScore": 82,
                "onTrackStatus": "Good"
            },
            "insights": [{ "title": "Raise your match", "description": "Contribute 2% more", "type": "tip" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    sign_in(&app, &server).await;

    let response = get(&app, "/analytics?period=3m").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert!(html.contains("$250.0K"));
    assert!(html.contains("4.5%"));
    assert!(html.contains("82/100"));
    assert!(html.contains("savings-growth-canvas"));
    assert!(html.contains("time-button active\" data-period=\"3m\""));
}

#[tokio::test]
async fn test_analytics_failure_shows_error_panel() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;

    let html = body_text(get(&app, "/section/analytics").await).await;
    assert!(html.contains("Failed to load analytics data. Please try again later."));
    assert!(!html.contains("<canvas"));
}

#[tokio::test]
async fn test_unknown_analytics_period_is_rejected() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);
    sign_in(&app, &server).await;

    let response = get(&app, "/analytics?period=2y").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(requests_to(&server, "/api/analytics").await.is_empty());
}
