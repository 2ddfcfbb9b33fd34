// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed content shown when live data is unavailable.

use crate::models::{Scenario, ScenarioPlan, Scenarios};
use crate::render::Region;

pub const MONTHLY_INCOME: &str = "$6,965";
pub const CURRENT_BALANCE: &str = "$106,965.67";
pub const RETIREMENT_STATUS: &str = "You are on track! ✓";

pub const TOTAL_MONTHLY: &str = "$975";
pub const TOTAL_ANNUAL: &str = "$11,700";
pub const PRIMARY_401K_BALANCE: f64 = 106_965.0;

pub const RETIREMENT_ACCOUNTS: &str = "<div class=\"account-item\">\
<strong>401(a) Plan</strong><br>Balance: $106,965.67<br>Status: On Track</div>";

pub const ACCOUNTS_LIST: &str = "<div class=\"account-list-item\">\
<h4>401(a) Plan - Finova</h4><p>Balance: $106,965.67</p><p>Type: 401K</p><p>Employer: Finova Corp</p></div>";

pub const CONTRIBUTIONS_LIST: &str = "<div class=\"contribution-list-item\">\
<h4>Employee Pre-tax</h4><p>Monthly: $650</p><p>Percentage: 8.5%</p></div>\
<div class=\"contribution-list-item\">\
<h4>Employer Match</h4><p>Monthly: $325</p><p>Percentage: 4.25%</p></div>";

pub const PROJECTED_BALANCE: f64 = 1_850_000.0;
pub const PROJECTED_MONTHLY_INCOME: f64 = 6_965.0;
pub const PLAN_STATUS: &str = "On Track";

pub const BENEFIT_AT_62: &str = "$2,156";
pub const BENEFIT_AT_67: &str = "$2,875";
pub const BENEFIT_AT_70: &str = "$3,565";

pub const STRATEGY: &str = "Balanced Growth";
pub const RISK_LEVEL: &str = "Moderate";
pub const STOCKS_PERCENTAGE: f64 = 70.0;
pub const BONDS_PERCENTAGE: f64 = 30.0;

pub const SUBSCRIPTION_ERROR: &str = "<div class=\"error-panel\">\
<p>Failed to load subscription details. Please try again later.</p></div>";

pub const PAYMENT_HISTORY_ERROR: &str = "<div class=\"error-panel\"><p>Failed to load payment history</p></div>";

pub const ANALYTICS_ERROR: &str = "<div class=\"loading error-panel\">\
<p>Failed to load analytics data. Please try again later.</p></div>";

pub fn contributions_summary(monthly: &str, annual: &str) -> String {
    format!(
        "<div class=\"contrib-item\"><strong>Total Monthly:</strong> {}<br>\
         <strong>Total Annual:</strong> {}<br><small>Pre-tax, Roth, and Employer Match</small></div>",
        monthly, annual
    )
}

pub fn income_sources(primary_balance: &str) -> String {
    format!(
        "<div class=\"income-item\"><strong>401(k) - Finova:</strong> {}<br>\
         <strong>Traditional IRA:</strong> $45,230<br><strong>Pension:</strong> Estimated</div>",
        primary_balance
    )
}

pub fn retirement_plan(balance: &str, income: &str, status: &str) -> String {
    format!(
        "<div class=\"planning-item\"><strong>Projected Balance:</strong> {}<br>\
         <strong>Monthly Income:</strong> {}<br><strong>Status:</strong> {}</div>",
        balance, income, status
    )
}

pub fn social_security(at_62: &str, at_67: &str, at_70: &str) -> String {
    format!(
        "<div class=\"planning-item\"><strong>At Age 62:</strong> {}<br>\
         <strong>At Age 67:</strong> {}<br><strong>At Age 70:</strong> {}</div>",
        at_62, at_67, at_70
    )
}

pub fn investment_strategy(strategy: &str, risk: &str, stocks: f64, bonds: f64) -> String {
    format!(
        "<div class=\"planning-item\"><strong>Strategy:</strong> {}<br>\
         <strong>Risk Level:</strong> {}<br><strong>Allocation:</strong> {}% Stocks, {}% Bonds</div>",
        strategy, risk, stocks, bonds
    )
}

/// What-if scenarios shown when the planning service is unavailable.
pub fn scenarios() -> Scenarios {
    let plan = |balance: f64, income: f64, status: &str| ScenarioPlan {
        projected_balance: balance,
        projected_monthly_income: income,
        status: status.to_string(),
    };
    let scenario = |description: &str, plan: ScenarioPlan| Scenario {
        description: description.to_string(),
        plan,
    };

    Scenarios {
        current: plan(PROJECTED_BALANCE, PROJECTED_MONTHLY_INCOME, PLAN_STATUS),
        scenario_a: Some(scenario(
            "Increase contributions by 20%",
            plan(2_150_000.0, 8_100.0, "Ahead of Schedule"),
        )),
        scenario_b: Some(scenario(
            "Retire at age 63",
            plan(1_420_000.0, 5_350.0, "Manageable"),
        )),
        scenario_c: Some(scenario(
            "Retire at age 67",
            plan(2_145_000.0, 8_100.0, "Excellent"),
        )),
    }
}

/// Fallback for a region that is filled on every section load.
pub fn region(region: Region) -> Option<String> {
    let html = match region {
        Region::MonthlyIncome => MONTHLY_INCOME.to_string(),
        Region::CurrentBalance => CURRENT_BALANCE.to_string(),
        Region::RetirementStatus => RETIREMENT_STATUS.to_string(),
        Region::RetirementAccounts => RETIREMENT_ACCOUNTS.to_string(),
        Region::ContributionsSummary => contributions_summary(TOTAL_MONTHLY, TOTAL_ANNUAL),
        Region::IncomeSources => income_sources("$106,965"),
        Region::AccountsList => ACCOUNTS_LIST.to_string(),
        Region::ContributionsList => CONTRIBUTIONS_LIST.to_string(),
        Region::RetirementPlan => retirement_plan("$1,850,000", MONTHLY_INCOME, PLAN_STATUS),
        Region::SocialSecurity => social_security(BENEFIT_AT_62, BENEFIT_AT_67, BENEFIT_AT_70),
        Region::InvestmentStrategy => {
            investment_strategy(STRATEGY, RISK_LEVEL, STOCKS_PERCENTAGE, BONDS_PERCENTAGE)
        }
        Region::SubscriptionCard => SUBSCRIPTION_ERROR.to_string(),
        Region::PaymentHistory => PAYMENT_HISTORY_ERROR.to_string(),
        Region::StatsGrid => ANALYTICS_ERROR.to_string(),
        Region::Scenarios
        | Region::CalculatorOutput
        | Region::SocialSecurityResults
        | Region::SavingsGrowthChart
        | Region::ContributionChart
        | Region::AccountChart
        | Region::QuarterlyReturns
        | Region::Insights => return None,
    };
    Some(html)
}
