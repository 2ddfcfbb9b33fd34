// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Planning section: retirement plan, social security, investment strategy
//! and what-if scenarios.

use super::{fallback, recover};
use crate::error::Result;
use crate::format::format_currency;
use crate::models::{InvestmentStrategy, RetirementPlan, Scenarios, SocialSecurityEstimate};
use crate::render::{escape, Page, Region, TabGroup};
use crate::services::Service;
use crate::AppState;

pub async fn load(state: &AppState) -> Result<()> {
    let user_id = state.auth.user_id();
    let plan_path = format!("/api/planning/retirement-plan/{}", user_id);
    let ss_path = format!("/api/planning/social-security/{}", user_id);
    let strategy_path = format!("/api/planning/investment-strategy/{}", user_id);

    let api = state.api.session();
    let (plan, social_security, strategy) = tokio::join!(
        api.get_json::<RetirementPlan>(Service::Planning, &plan_path),
        api.get_json::<SocialSecurityEstimate>(Service::Planning, &ss_path),
        api.get_json::<InvestmentStrategy>(Service::Planning, &strategy_path),
    );
    let plan = recover(plan, "retirement plan")?.unwrap_or_default();
    let social_security = recover(social_security, "social security")?.unwrap_or_default();
    let strategy = recover(strategy, "investment strategy")?.unwrap_or_default();

    let mut page = state.page.write().await;
    render_plan(&mut page, &plan);
    render_social_security(&mut page, &social_security);
    render_strategy(&mut page, &strategy);
    Ok(())
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn text_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

/// Missing or zero fields take the sample plan's values.
pub fn render_plan(page: &mut Page, plan: &RetirementPlan) {
    let balance = nonzero(plan.projected_balance).unwrap_or(fallback::PROJECTED_BALANCE);
    let income =
        nonzero(plan.projected_monthly_income).unwrap_or(fallback::PROJECTED_MONTHLY_INCOME);
    page.set_region(
        Region::RetirementPlan,
        fallback::retirement_plan(
            &format_currency(Some(balance)),
            &format_currency(Some(income)),
            &escape(text_or(&plan.status, fallback::PLAN_STATUS)),
        ),
    );
}

pub fn render_social_security(page: &mut Page, estimate: &SocialSecurityEstimate) {
    page.set_region(
        Region::SocialSecurity,
        fallback::social_security(
            &escape(text_or(&estimate.formatted_benefit_at_62, fallback::BENEFIT_AT_62)),
            &escape(text_or(&estimate.formatted_benefit_at_67, fallback::BENEFIT_AT_67)),
            &escape(text_or(&estimate.formatted_benefit_at_70, fallback::BENEFIT_AT_70)),
        ),
    );
}

pub fn render_strategy(page: &mut Page, strategy: &InvestmentStrategy) {
    page.set_region(
        Region::InvestmentStrategy,
        fallback::investment_strategy(
            &escape(text_or(&strategy.current_strategy, fallback::STRATEGY)),
            &escape(text_or(&strategy.risk_level, fallback::RISK_LEVEL)),
            nonzero(strategy.stocks_percentage).unwrap_or(fallback::STOCKS_PERCENTAGE),
            nonzero(strategy.bonds_percentage).unwrap_or(fallback::BONDS_PERCENTAGE),
        ),
    );
}

/// Fetch the what-if scenarios and show them on the scenarios tab.
pub async fn load_scenarios(state: &AppState) -> Result<()> {
    let path = format!("/api/planning/scenarios/{}", state.auth.user_id());
    let scenarios = recover(
        state.api.get_json::<Scenarios>(Service::Planning, &path).await,
        "scenarios",
    )?
    .unwrap_or_else(fallback::scenarios);

    let mut page = state.page.write().await;
    page.select_tab(TabGroup::Planning, "scenarios")?;
    render_scenarios(&mut page, &scenarios);
    Ok(())
}

pub fn render_scenarios(page: &mut Page, scenarios: &Scenarios) {
    let card = |class: &str, title: &str, balance: f64, income: f64, status: &str| {
        format!(
            "<div class=\"{}\"><h4>{}</h4><div class=\"scenario-details\">\
             <p><strong>Balance:</strong> {}</p>\
             <p><strong>Monthly Income:</strong> {}</p>\
             <p><strong>Status:</strong> {}</p></div></div>",
            class,
            escape(title),
            format_currency(Some(balance)),
            format_currency(Some(income)),
            escape(status)
        )
    };

    let current = &scenarios.current;
    let mut html = card(
        "scenario-card current-scenario",
        "Current Scenario",
        current.projected_balance,
        current.projected_monthly_income,
        &current.status,
    );
    for scenario in scenarios.alternatives() {
        html.push_str(&card(
            "scenario-card",
            &scenario.description,
            scenario.plan.projected_balance,
            scenario.plan.projected_monthly_income,
            &scenario.plan.status,
        ));
    }
    page.set_region(Region::Scenarios, html);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_plan_takes_defaults() {
        let plan = RetirementPlan {
            projected_balance: Some(2_000_000.0),
            projected_monthly_income: Some(0.0),
            status: None,
        };
        let mut page = Page::new();
        render_plan(&mut page, &plan);

        let html = page.region(Region::RetirementPlan).unwrap();
        assert!(html.contains("$2,000,000"));
        assert!(html.contains("$6,965"));
        assert!(html.contains("On Track"));
    }

    #[test]
    fn strategy_defaults_allocation() {
        let mut page = Page::new();
        render_strategy(&mut page, &InvestmentStrategy::default());
        assert!(page
            .region(Region::InvestmentStrategy)
            .unwrap()
            .contains("70% Stocks, 30% Bonds"));
    }

    #[test]
    fn sample_scenarios_render_all_cards() {
        let mut page = Page::new();
        render_scenarios(&mut page, &fallback::scenarios());

        let html = page.region(Region::Scenarios).unwrap();
        assert_eq!(html.matches("scenario-card").count(), 4);
        assert!(html.contains("Current Scenario"));
        assert!(html.contains("Retire at age 63"));
        assert!(html.contains("$2,150,000"));
    }
}
