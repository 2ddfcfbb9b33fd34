// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Finova Dashboard shell server
//!
//! Serves the retirement dashboard locally and receives the identity
//! provider's login redirect.

use finova_dashboard::{
    app,
    config::Config,
    services::health,
    storage::{FileStore, KeyValueStore, MemoryStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        gateway = %config.gateway_url,
        "Starting Finova dashboard"
    );

    let persistent: Arc<dyn KeyValueStore> = match &config.storage_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using file-backed session store");
            Arc::new(FileStore::open(path))
        }
        None => Arc::new(MemoryStore::new()),
    };
    let transient: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    let state = Arc::new(AppState::new(config.clone(), persistent, transient)?);

    match app::bootstrap(&state, None).await {
        Ok(outcome) => tracing::info!(state = ?outcome, "Session initialized"),
        Err(e) => tracing::warn!(error = %e, "Session initialization failed"),
    }

    let poller = health::spawn_polling(state.clone());
    tracing::info!(
        interval_secs = config.health_poll_interval.as_secs(),
        "Health polling started"
    );

    let router = finova_dashboard::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, router).await?;
    poller.abort();
    Ok(())
}

/// Structured JSON logging; `RUST_LOG` overrides the default filter.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("finova_dashboard=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
