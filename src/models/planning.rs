// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Planning-service payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlan {
    #[serde(default)]
    pub projected_balance: Option<f64>,
    #[serde(default)]
    pub projected_monthly_income: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Pre-formatted monthly benefits at the three claiming ages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSecurityEstimate {
    #[serde(default)]
    pub formatted_benefit_at_62: Option<String>,
    #[serde(default)]
    pub formatted_benefit_at_67: Option<String>,
    #[serde(default)]
    pub formatted_benefit_at_70: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentStrategy {
    #[serde(default)]
    pub current_strategy: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub stocks_percentage: Option<f64>,
    #[serde(default)]
    pub bonds_percentage: Option<f64>,
}

/// Projected outcome of one plan variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPlan {
    pub projected_balance: f64,
    pub projected_monthly_income: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub description: String,
    pub plan: ScenarioPlan,
}

/// `/api/planning/scenarios/{userId}`: the current plan and up to three what-ifs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenarios {
    pub current: ScenarioPlan,
    #[serde(default)]
    pub scenario_a: Option<Scenario>,
    #[serde(default)]
    pub scenario_b: Option<Scenario>,
    #[serde(default)]
    pub scenario_c: Option<Scenario>,
}

impl Scenarios {
    pub fn alternatives(&self) -> impl Iterator<Item = &Scenario> {
        [&self.scenario_a, &self.scenario_b, &self.scenario_c]
            .into_iter()
            .flatten()
    }
}
