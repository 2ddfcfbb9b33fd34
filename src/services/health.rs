// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend service health monitoring.
//!
//! Each service is probed over its candidate URLs in order with a short
//! per-attempt timeout. Failures are reported as data, never as errors.

use crate::config::Config;
use crate::error::AppError;
use crate::services::api::{check_response, Service};
use crate::services::resolver::{candidate_urls, first_success};
use crate::AppState;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Outcome of probing one service.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthStatus {
    Up { endpoint: String, body: String },
    Down { error: String },
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ServiceHealth {
    pub service: Service,
    pub status: HealthStatus,
}

/// Result of one full sweep.
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub services: Vec<ServiceHealth>,
    pub checked_at: DateTime<Utc>,
}

impl SweepReport {
    pub fn up_count(&self) -> usize {
        self.services.iter().filter(|s| s.status.is_up()).count()
    }

    pub fn total(&self) -> usize {
        self.services.len()
    }

    pub fn status(&self, service: Service) -> Option<&HealthStatus> {
        self.services
            .iter()
            .find(|s| s.service == service)
            .map(|s| &s.status)
    }

    /// Banner text for the header.
    pub fn banner(&self) -> String {
        let (up, total) = (self.up_count(), self.total());
        if up == total {
            "All Services Online".to_string()
        } else if up > 0 {
            format!("{}/{} Services Online", up, total)
        } else {
            "Services Offline".to_string()
        }
    }
}

/// Clears the sweep flag when a sweep ends, even by panic.
struct SweepGuard<'a>(&'a AtomicBool);

impl Drop for SweepGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct HealthMonitor {
    http: reqwest::Client,
    config: Config,
    timeout: Duration,
    checking: AtomicBool,
}

impl HealthMonitor {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            config: config.clone(),
            timeout: config.health_probe_timeout,
            checking: AtomicBool::new(false),
        }
    }

    /// Health URLs for `service`: the gateway route, then the service itself.
    pub fn candidates(&self, service: Service) -> Vec<String> {
        let gateway_path = format!("/api/{}/health", service.name());
        let mut urls = candidate_urls(&[&self.config.gateway_url], &gateway_path);

        let direct_path = match service {
            Service::Payment | Service::Analytics => "/actuator/health".to_string(),
            _ => gateway_path,
        };
        for url in candidate_urls(&[service.base_url(&self.config)], &direct_path) {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
        urls
    }

    /// Probe candidates in order; the first 2xx wins.
    pub async fn probe(&self, candidates: &[String]) -> HealthStatus {
        let timeout = self.timeout;
        let result = first_success(candidates, |url| {
            let http = self.http.clone();
            async move {
                let attempt = async {
                    let response = check_response(http.get(&url).send().await?).await?;
                    Ok::<_, AppError>(response.text().await.unwrap_or_default())
                };
                tokio::time::timeout(timeout, attempt)
                    .await
                    .map_err(|_| AppError::Network(format!("timed out after {:?}", timeout)))?
            }
        })
        .await;

        match result {
            Ok((endpoint, body)) => HealthStatus::Up { endpoint, body },
            Err(e) => {
                tracing::debug!(error = %e, "All health endpoints failed");
                HealthStatus::Down {
                    error: "All endpoints failed".to_string(),
                }
            }
        }
    }

    /// Probe every service concurrently.
    ///
    /// Returns `None` without probing if another sweep is still running.
    pub async fn sweep(&self) -> Option<SweepReport> {
        if self
            .checking
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Health sweep already in progress");
            return None;
        }
        let _guard = SweepGuard(&self.checking);

        let probes = Service::ALL.into_iter().map(|service| async move {
            let candidates = self.candidates(service);
            ServiceHealth {
                service,
                status: self.probe(&candidates).await,
            }
        });
        let report = SweepReport {
            services: join_all(probes).await,
            checked_at: Utc::now(),
        };

        tracing::info!(
            up = report.up_count(),
            total = report.total(),
            "Health sweep complete"
        );
        Some(report)
    }

    pub fn is_checking(&self) -> bool {
        self.checking.load(Ordering::Acquire)
    }
}

/// Sweep on a fixed interval and publish each report to the page.
pub fn spawn_polling(state: Arc<AppState>) -> JoinHandle<()> {
    let period = state.config.health_poll_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if let Some(report) = state.health.sweep().await {
                state.page.write().await.apply_health(&report);
            }
        }
    })
}

/// Run one sweep now and publish it. False when a sweep was already running.
pub async fn refresh(state: &AppState) -> bool {
    match state.health.sweep().await {
        Some(report) => {
            state.page.write().await.apply_health(&report);
            true
        }
        None => false,
    }
}
