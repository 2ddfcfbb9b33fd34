// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for backend payloads and session state.

pub mod account;
pub mod analytics;
pub mod dashboard;
pub mod planning;
pub mod subscription;
pub mod user;

pub use account::{
    Account, Contribution, ContributionSummary, IncomeSourceSummary, NewAccount, NewContribution,
};
pub use analytics::{
    AccountBreakdown, AnalyticsDashboard, ContributionBreakdown, Insight, KeyStats, Period,
    QuarterlyReturns, SavingsGrowthPoint,
};
pub use dashboard::DashboardSummary;
pub use planning::{
    InvestmentStrategy, RetirementPlan, Scenario, ScenarioPlan, Scenarios, SocialSecurityEstimate,
};
pub use subscription::{
    BillingFrequency, Payment, PaymentMethod, PaymentMethodUpdate, PaymentType, Subscription,
};
pub use user::{AuthMeResponse, TokenResponse, UserProfile, ValidateResponse};
