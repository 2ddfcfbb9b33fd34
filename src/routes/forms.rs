// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form submissions and subscription actions.

use super::redirect;
use crate::controllers::{accounts, calculators, payments, planning};
use crate::error::Result;
use crate::validation::FormValues;
use crate::AppState;
use axum::{extract::State, response::Redirect, routing::post, Form, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/contributions", post(create_contribution))
        .route("/calculators/retirement", post(retirement_calculator))
        .route("/calculators/social-security", post(social_security_calculator))
        .route("/planning/scenarios", post(scenarios))
        .route("/payments/method", post(payment_method))
        .route("/payments/frequency", post(frequency))
        .route("/payments/pause", post(pause))
        .route("/payments/cancel", post(cancel))
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    Form(values): Form<FormValues>,
) -> Result<Redirect> {
    let result = accounts::create_account(&state, values).await;
    redirect(&state, result).await
}

async fn create_contribution(
    State(state): State<Arc<AppState>>,
    Form(values): Form<FormValues>,
) -> Result<Redirect> {
    let result = accounts::create_contribution(&state, values).await;
    redirect(&state, result).await
}

async fn retirement_calculator(
    State(state): State<Arc<AppState>>,
    Form(values): Form<FormValues>,
) -> Result<Redirect> {
    let result = calculators::retirement(&state, values).await;
    redirect(&state, result).await
}

async fn social_security_calculator(
    State(state): State<Arc<AppState>>,
    Form(values): Form<FormValues>,
) -> Result<Redirect> {
    let result = calculators::social_security(&state, values).await;
    redirect(&state, result).await
}

async fn scenarios(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let result = planning::load_scenarios(&state).await;
    redirect(&state, result).await
}

async fn payment_method(
    State(state): State<Arc<AppState>>,
    Form(values): Form<FormValues>,
) -> Result<Redirect> {
    let result = payments::update_payment_method(&state, values).await;
    redirect(&state, result).await
}

async fn frequency(
    State(state): State<Arc<AppState>>,
    Form(values): Form<FormValues>,
) -> Result<Redirect> {
    let result = payments::update_frequency(&state, values).await;
    redirect(&state, result).await
}

async fn pause(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let result = payments::pause(&state).await;
    redirect(&state, result).await
}

async fn cancel(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let result = payments::cancel(&state).await;
    redirect(&state, result).await
}
