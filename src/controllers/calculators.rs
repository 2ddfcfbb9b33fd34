// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Retirement projection and social security estimate.
//!
//! Both are computed locally from the submitted form; nothing is fetched.

use crate::error::Result;
use crate::format::format_currency;
use crate::render::{Page, Region, TabGroup, RETIREMENT_CALCULATOR_FORM, SOCIAL_SECURITY_FORM};
use crate::validation::forms::{validate_retirement_calculator, validate_social_security};
use crate::validation::FormValues;
use crate::AppState;

/// Balance above which a projection counts as on track.
const ON_TRACK_BALANCE: f64 = 1_000_000.0;

/// Annual withdrawal rate used to turn a balance into income.
const WITHDRAWAL_RATE: f64 = 0.04;

/// Share of pre-retirement income replaced at full retirement age.
const REPLACEMENT_RATE: f64 = 0.4;

/// Years of work needed for the full benefit.
const FULL_CAREER_YEARS: f64 = 35.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub years_to_retirement: i64,
    pub projected_balance: f64,
    pub monthly_income: f64,
}

impl Projection {
    pub fn on_track(&self) -> bool {
        self.projected_balance > ON_TRACK_BALANCE
    }
}

/// Compound the current balance annually and the contributions monthly.
///
/// `annual_return` is a percentage (`7` for 7%).
pub fn project_retirement(
    current_age: i64,
    retirement_age: i64,
    current_balance: f64,
    monthly_contribution: f64,
    annual_return: f64,
) -> Projection {
    let years = retirement_age - current_age;
    let months = (years * 12) as f64;
    let annual_rate = annual_return / 100.0;
    let monthly_rate = annual_rate / 12.0;

    let grown_balance = current_balance * (1.0 + annual_rate).powf(years as f64);
    let grown_contributions = if monthly_rate == 0.0 {
        monthly_contribution * months
    } else {
        monthly_contribution * (((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate)
    };
    let projected_balance = grown_balance + grown_contributions;

    Projection {
        years_to_retirement: years,
        projected_balance,
        monthly_income: projected_balance * WITHDRAWAL_RATE / 12.0,
    }
}

/// Monthly benefits when claiming at 62, 67 and 70.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenefitEstimate {
    pub at_62: f64,
    pub at_67: f64,
    pub at_70: f64,
}

pub fn estimate_social_security(annual_income: f64, years_worked: i64) -> BenefitEstimate {
    let full = annual_income * REPLACEMENT_RATE * (years_worked as f64 / FULL_CAREER_YEARS).min(1.0);
    BenefitEstimate {
        at_62: full * 0.75 / 12.0,
        at_67: full / 12.0,
        at_70: full * 1.24 / 12.0,
    }
}

pub fn render_projection(projection: &Projection) -> String {
    let (class, status) = if projection.on_track() {
        ("good", "On Track ✓")
    } else {
        ("warning", "Consider increasing contributions")
    };
    format!(
        "<div class=\"calculation-results\">\
         <div class=\"result-item\"><strong>Years to Retirement:</strong> {}</div>\
         <div class=\"result-item\"><strong>Projected Balance:</strong> {}</div>\
         <div class=\"result-item\"><strong>Monthly Retirement Income:</strong> {}</div>\
         <div class=\"result-item status-{}\"><strong>Status:</strong> {}</div></div>",
        projection.years_to_retirement,
        format_currency(Some(projection.projected_balance)),
        format_currency(Some(projection.monthly_income)),
        class,
        status
    )
}

pub fn render_benefits(estimate: &BenefitEstimate) -> String {
    format!(
        "<div class=\"ss-results\">\
         <div class=\"ss-item\"><strong>At Age 62 (Early):</strong> {}/month</div>\
         <div class=\"ss-item\"><strong>At Age 67 (Full):</strong> {}/month</div>\
         <div class=\"ss-item\"><strong>At Age 70 (Delayed):</strong> {}/month</div>\
         <p><small>*Estimates only - actual benefits may vary. Check SSA.gov for official estimates.</small></p></div>",
        format_currency(Some(estimate.at_62)),
        format_currency(Some(estimate.at_67)),
        format_currency(Some(estimate.at_70))
    )
}

fn number(values: &FormValues, field: &str) -> f64 {
    values
        .get(field)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_default()
}

/// Validate the calculator form and show either the projection or the errors.
pub fn submit_retirement(page: &mut Page, values: FormValues) {
    let validation = validate_retirement_calculator(&values);
    if !validation.is_valid {
        page.clear_region(Region::CalculatorOutput);
        page.reject_form(RETIREMENT_CALCULATOR_FORM, values, validation.errors);
        return;
    }

    let projection = project_retirement(
        number(&values, "currentAge") as i64,
        number(&values, "retirementAge") as i64,
        number(&values, "currentBalance"),
        number(&values, "monthlyContribution"),
        number(&values, "annualReturn"),
    );
    page.set_region(Region::CalculatorOutput, render_projection(&projection));
    page.fill_form(RETIREMENT_CALCULATOR_FORM, values);
}

pub fn submit_social_security(page: &mut Page, values: FormValues) {
    let validation = validate_social_security(&values);
    if !validation.is_valid {
        page.clear_region(Region::SocialSecurityResults);
        page.reject_form(SOCIAL_SECURITY_FORM, values, validation.errors);
        return;
    }

    let estimate = estimate_social_security(
        number(&values, "annualIncome"),
        number(&values, "yearsWorked") as i64,
    );
    page.set_region(Region::SocialSecurityResults, render_benefits(&estimate));
    page.fill_form(SOCIAL_SECURITY_FORM, values);
}

pub async fn retirement(state: &AppState, values: FormValues) -> Result<()> {
    let mut page = state.page.write().await;
    page.select_tab(TabGroup::Planning, "calculator")?;
    submit_retirement(&mut page, values);
    Ok(())
}

pub async fn social_security(state: &AppState, values: FormValues) -> Result<()> {
    let mut page = state.page.write().await;
    page.select_tab(TabGroup::Planning, "social-security")?;
    submit_social_security(&mut page, values);
    Ok(())
}
