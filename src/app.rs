// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Startup and session transitions of the dashboard.

use crate::controllers::load_section;
use crate::error::Result;
use crate::render::{NoticeKind, Section};
use crate::services::{AuthState, LoginCallback};
use crate::AppState;

/// Establish the session and render the first view.
///
/// Without a session the login prompt is shown and nothing is fetched. A
/// failed login callback is reported on the page and returned.
pub async fn bootstrap(state: &AppState, callback: Option<&LoginCallback>) -> Result<AuthState> {
    match state.auth.initialize(callback).await {
        Ok(AuthState::Authenticated) => {
            settle(state, on_authenticated(state).await).await?;
            Ok(state.auth.auth_state())
        }
        Ok(other) => {
            state.page.write().await.show_login();
            Ok(other)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Authentication failed");
            let mut page = state.page.write().await;
            page.show_login();
            page.notify(NoticeKind::Error, format!("Authentication failed: {}", e));
            Err(e)
        }
    }
}

/// Switch to the application view and load the dashboard.
pub async fn on_authenticated(state: &AppState) -> Result<()> {
    state
        .page
        .write()
        .await
        .show_app(state.auth.current_user());
    load_section(state, Section::Dashboard).await
}

/// Put the login view back when `result` is an auth failure.
///
/// Any other outcome is passed through unchanged.
pub async fn settle(state: &AppState, result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_auth_error() => {
            tracing::info!(error = %e, "Session lost, returning to login");
            let mut page = state.page.write().await;
            page.show_login();
            page.notify(
                NoticeKind::Error,
                "Your session has expired. Please log in again.",
            );
            Ok(())
        }
        other => other,
    }
}

/// End the session and show the login prompt.
pub async fn logout(state: &AppState) {
    state.auth.logout();
    state.page.write().await.show_login();
}
