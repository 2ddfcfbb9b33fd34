// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation: sections, tabs and modals.

use super::render;
use crate::controllers::load_section;
use crate::error::Result;
use crate::models::Period;
use crate::render::{Modal, Section, TabGroup};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/section/{name}", get(show_section))
        .route("/tabs/{group}/{tab}", get(show_tab))
        .route("/modals/close", get(close_modal))
        .route("/modals/{name}", get(open_modal))
        .route("/analytics", get(analytics))
}

/// Switch section and reload its data.
async fn show_section(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response> {
    let section = Section::parse(&name)?;
    state.page.write().await.navigate(section);
    let result = load_section(&state, section).await;
    render(&state, result).await
}

async fn show_tab(
    State(state): State<Arc<AppState>>,
    Path((group, tab)): Path<(String, String)>,
) -> Result<Response> {
    let group = TabGroup::parse(&group)?;
    {
        let mut page = state.page.write().await;
        page.select_tab(group, &tab)?;
        page.navigate(match group {
            TabGroup::Planning => Section::Planning,
            TabGroup::Account => Section::Accounts,
        });
    }
    render(&state, Ok(())).await
}

async fn open_modal(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response> {
    let modal = Modal::parse(&name)?;
    state.page.write().await.open_modal(modal);
    render(&state, Ok(())).await
}

async fn close_modal(State(state): State<Arc<AppState>>) -> Result<Response> {
    state.page.write().await.close_modal();
    render(&state, Ok(())).await
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    #[serde(default)]
    period: Option<String>,
}

/// Analytics section for a reporting period (default: the current one).
async fn analytics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Response> {
    {
        let mut page = state.page.write().await;
        if let Some(raw) = params.period.as_deref() {
            let period = Period::parse(raw).ok_or_else(|| {
                crate::error::AppError::BadRequest(format!("unknown period {}", raw))
            })?;
            page.set_period(period);
        }
        page.navigate(Section::Analytics);
    }
    let result = load_section(&state, Section::Analytics).await;
    render(&state, result).await
}
