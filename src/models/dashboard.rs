//! Account-service dashboard summary.

use serde::Deserialize;

/// `/api/dashboard/{userId}` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub primary_account: Option<PrimaryAccount>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryAccount {
    #[serde(default)]
    pub estimated_monthly_income: Option<f64>,
    #[serde(default)]
    pub current_balance: Option<f64>,
}
