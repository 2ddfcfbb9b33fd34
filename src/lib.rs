// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Finova Dashboard: retirement-planning dashboard client
//!
//! This crate signs users in through the Finova identity provider, pulls
//! account, planning, payment and analytics data from the backend services,
//! and serves the rendered dashboard from a small local shell server.

pub mod app;
pub mod config;
pub mod controllers;
pub mod error;
pub mod format;
pub mod middleware;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;
pub mod storage;
pub mod time_utils;
pub mod validation;

use config::Config;
use error::{AppError, Result};
use render::Page;
use services::{ApiClient, AuthService, HealthMonitor};
use std::sync::Arc;
use storage::KeyValueStore;
use tokio::sync::RwLock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth: Arc<AuthService>,
    pub api: ApiClient,
    pub health: HealthMonitor,
    /// The only mutable view state; every handler renders from it.
    pub page: RwLock<Page>,
}

impl AppState {
    pub fn new(
        config: Config,
        persistent: Arc<dyn KeyValueStore>,
        transient: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        let auth = Arc::new(AuthService::new(&config, http.clone(), persistent, transient));
        let api = ApiClient::new(&config, http.clone(), auth.clone());
        let health = HealthMonitor::new(&config, http);

        Ok(Self {
            config,
            auth,
            api,
            health,
            page: RwLock::new(Page::new()),
        })
    }
}
