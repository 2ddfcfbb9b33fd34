// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Retirement accounts, contributions and income sources.

use serde::{Deserialize, Serialize};

/// Retirement account as listed by the account service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub current_balance: Option<f64>,
    #[serde(default)]
    pub on_track: bool,
    #[serde(default)]
    pub employer: Option<String>,
}

impl Account {
    /// Account name, falling back to its type.
    pub fn title(&self) -> &str {
        self.account_name
            .as_deref()
            .or(self.account_type.as_deref())
            .unwrap_or("Account")
    }
}

/// One recurring contribution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    #[serde(default)]
    pub contribution_type: String,
    #[serde(default)]
    pub monthly_amount: Option<f64>,
    #[serde(default)]
    pub percentage: Option<f64>,
}

/// `/api/contributions/user/{id}/summary`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSummary {
    #[serde(default)]
    pub total_monthly_formatted: Option<String>,
    #[serde(default)]
    pub total_annual_formatted: Option<String>,
}

/// `/api/income-sources/user/{id}/summary`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSourceSummary {
    #[serde(default)]
    pub total_current_balance: Option<f64>,
}

/// Payload for `POST /api/accounts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: String,
    pub account_name: String,
    pub account_type: String,
    pub current_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,
}

/// Payload for `POST /api/contributions`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    pub user_id: String,
    pub contribution_type: String,
    pub monthly_amount: f64,
    pub percentage: Option<f64>,
}
