// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health probes against mock gateway and service endpoints.

mod common;

use common::*;
use finova_dashboard::config::Config;
use finova_dashboard::services::health::{self, HealthMonitor};
use finova_dashboard::services::{HealthStatus, Service};
use std::time::Duration;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn monitor(config: &Config) -> HealthMonitor {
    HealthMonitor::new(config, reqwest::Client::new())
}

#[tokio::test]
async fn test_slow_gateway_falls_through_to_service() {
    let gateway = MockServer::start().await;
    let direct = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&gateway)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("UP"))
        .mount(&direct)
        .await;

    let mut config = Config::with_backend(&direct.uri());
    config.gateway_url = gateway.uri();
    config.health_probe_timeout = Duration::from_millis(200);
    let monitor = monitor(&config);

    let status = monitor.probe(&monitor.candidates(Service::User)).await;
    assert_eq!(
        status,
        HealthStatus::Up {
            endpoint: format!("{}/api/users/health", direct.uri()),
            body: "UP".to_string(),
        }
    );
}

#[tokio::test]
async fn test_all_candidates_failing_is_down() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let monitor = monitor(&Config::with_backend(&server.uri()));

    let status = monitor.probe(&monitor.candidates(Service::Planning)).await;
    assert_eq!(
        status,
        HealthStatus::Down {
            error: "All endpoints failed".to_string()
        }
    );
}

#[tokio::test]
async fn test_payment_service_probed_on_actuator() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actuator/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"UP"}"#))
        .mount(&server)
        .await;
    let monitor = monitor(&Config::with_backend(&server.uri()));

    let candidates = monitor.candidates(Service::Payment);
    assert_eq!(candidates.len(), 2);
    match monitor.probe(&candidates).await {
        HealthStatus::Up { endpoint, .. } => {
            assert_eq!(endpoint, format!("{}/actuator/health", server.uri()))
        }
        other => panic!("expected payments to be up, got {:?}", other),
    }
}

#[tokio::test]
async fn test_overlapping_sweep_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;
    let monitor = monitor(&Config::with_backend(&server.uri()));

    let (first, second) = tokio::join!(monitor.sweep(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        monitor.sweep().await
    });

    let first = first.expect("first sweep runs");
    assert_eq!(first.total(), 5);
    assert_eq!(first.up_count(), 5);
    assert!(second.is_none());
    assert!(!monitor.is_checking());
    assert!(monitor.sweep().await.is_some());
}

#[tokio::test]
async fn test_refresh_publishes_banner() {
    let server = MockServer::start().await;
    for route in ["/api/users/health", "/api/accounts/health"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
    }
    let app = create_test_app(&server);

    assert!(health::refresh(&app.state).await);

    let page = app.state.page.read().await;
    let report = page.health().expect("report published");
    assert_eq!(report.banner(), "2/5 Services Online");
    assert!(report.status(Service::Account).unwrap().is_up());
    assert!(!report.status(Service::Analytics).unwrap().is_up());
}
