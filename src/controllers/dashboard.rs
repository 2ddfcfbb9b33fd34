// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard summary cards.

use super::{fallback, recover};
use crate::error::Result;
use crate::format::format_currency;
use crate::models::DashboardSummary;
use crate::render::{escape, Page, Region};
use crate::services::Service;
use crate::AppState;

pub async fn load(state: &AppState) -> Result<()> {
    let path = format!("/api/dashboard/{}", state.auth.user_id());
    let summary = recover(
        state.api.get_json::<DashboardSummary>(Service::Account, &path).await,
        "dashboard",
    )?;

    let mut page = state.page.write().await;
    match summary {
        Some(summary) => render(&mut page, &summary),
        None => render_fallback(&mut page),
    }
    Ok(())
}

/// Fill the cards from a summary. Cards the summary has no data for stay empty.
pub fn render(page: &mut Page, summary: &DashboardSummary) {
    if let Some(primary) = &summary.primary_account {
        page.set_region(
            Region::MonthlyIncome,
            format_currency(primary.estimated_monthly_income),
        );
        page.set_region(Region::CurrentBalance, format_currency(primary.current_balance));
    }
    page.set_region(
        Region::RetirementStatus,
        escape(summary.status.as_deref().unwrap_or("Status unavailable")),
    );
}

pub fn render_fallback(page: &mut Page) {
    page.set_region(Region::MonthlyIncome, fallback::MONTHLY_INCOME.to_string());
    page.set_region(Region::CurrentBalance, fallback::CURRENT_BALANCE.to_string());
    page.set_region(Region::RetirementStatus, fallback::RETIREMENT_STATUS.to_string());
}
