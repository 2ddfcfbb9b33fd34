// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single sign-on routes: login redirect, provider callback, logout.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::app;
use crate::error::Result;
use crate::render::NoticeKind;
use crate::services::LoginCallback;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", post(logout))
}

/// Start the authorization-code flow at the identity provider.
async fn login(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let url = state.auth.start_login()?;
    Ok(Redirect::temporary(&url))
}

/// Identity provider redirect target.
///
/// Whatever the outcome, the browser lands on `/`; failures are shown there.
async fn callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LoginCallback>,
) -> Redirect {
    if let Some(error) = params.error.as_deref() {
        tracing::warn!(error, "Identity provider returned an error");
        let mut page = state.page.write().await;
        page.show_login();
        page.notify(NoticeKind::Error, format!("Login failed: {}", error));
        return Redirect::to("/");
    }

    match app::bootstrap(&state, Some(&params)).await {
        Ok(outcome) => tracing::info!(state = ?outcome, "Login callback handled"),
        Err(e) => tracing::warn!(error = %e, "Login callback rejected"),
    }
    Redirect::to("/")
}

async fn logout(State(state): State<Arc<AppState>>) -> Redirect {
    app::logout(&state).await;
    Redirect::to("/")
}
