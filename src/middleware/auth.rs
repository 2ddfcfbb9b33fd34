// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session gate for the dashboard routes.

use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Middleware that requires a valid session.
///
/// Without one the login view is restored and the browser is sent to `/`.
/// The wrapped handler never runs, so no backend request is made.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if state.auth.is_session_valid() {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "No valid session, redirecting to login");
    let mut page = state.page.write().await;
    if page.is_authenticated() {
        page.show_login();
    }
    Redirect::to("/").into_response()
}
