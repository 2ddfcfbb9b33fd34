// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers for the dashboard shell.
//!
//! GET handlers render the page; POST handlers apply their action and
//! redirect back to `/`.

pub mod auth;
pub mod forms;
pub mod pages;

use crate::app;
use crate::error::Result;
use crate::middleware::auth::require_session;
use crate::AppState;
use axum::{
    extract::State,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    pub authenticated: bool,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        authenticated: state.auth.is_session_valid(),
    })
}

/// Current page. An expired session falls back to the login prompt.
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut page = state.page.write().await;
    if page.is_authenticated() && !state.auth.is_session_valid() {
        page.show_login();
    }
    let html = page.to_html();
    page.take_notice();
    Html(html)
}

/// Finish a GET action: auth failures go back to `/`, anything else renders.
pub(crate) async fn render(state: &AppState, result: Result<()>) -> Result<Response> {
    app::settle(state, result).await?;
    let mut page = state.page.write().await;
    if !page.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }
    let html = page.to_html();
    page.take_notice();
    Ok(Html(html).into_response())
}

/// Finish a POST action with a redirect to `/`.
pub(crate) async fn redirect(state: &AppState, result: Result<()>) -> Result<Redirect> {
    app::settle(state, result).await?;
    Ok(Redirect::to("/"))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .merge(auth::routes());

    // Dashboard routes (session required)
    let protected_routes = Router::new()
        .merge(pages::routes())
        .merge(forms::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
