// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analytics dashboard snapshot.
//!
//! One snapshot is fetched per selected period and replaces the previous one
//! wholesale.

use serde::Deserialize;
use std::fmt;

/// Reporting window for the analytics dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    ThreeMonths,
    SixMonths,
    #[default]
    TwelveMonths,
    YearToDate,
    All,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::ThreeMonths,
        Period::SixMonths,
        Period::TwelveMonths,
        Period::YearToDate,
        Period::All,
    ];

    /// Query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::ThreeMonths => "3m",
            Period::SixMonths => "6m",
            Period::TwelveMonths => "12m",
            Period::YearToDate => "ytd",
            Period::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::ThreeMonths => "3 Months",
            Period::SixMonths => "6 Months",
            Period::TwelveMonths => "12 Months",
            Period::YearToDate => "Year to Date",
            Period::All => "All Time",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|p| p.as_str() == raw)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDashboard {
    pub key_stats: KeyStats,
    #[serde(default)]
    pub savings_growth: Vec<SavingsGrowthPoint>,
    #[serde(default)]
    pub contribution_breakdown: ContributionBreakdown,
    #[serde(default)]
    pub account_breakdown: Vec<AccountBreakdown>,
    #[serde(default)]
    pub quarterly_returns: QuarterlyReturns,
    #[serde(default)]
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyStats {
    pub total_assets: f64,
    /// `up` or `down`
    pub total_assets_trend: String,
    pub trend_percentage: f64,
    pub annual_contribution: f64,
    pub annual_contribution_trend: String,
    pub contribution_trend_percentage: f64,
    pub ytd_return: f64,
    pub ytd_return_trend: String,
    pub return_trend_percentage: f64,
    pub on_track_score: i64,
    pub on_track_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavingsGrowthPoint {
    pub month: String,
    pub actual_balance: f64,
    pub target_balance: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributionBreakdown {
    pub employee_contributions: f64,
    pub employer_match: f64,
    pub previous_balance: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountBreakdown {
    pub account_type: String,
    pub account_name: String,
    pub balance: f64,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuarterlyReturns {
    pub q1_return: f64,
    pub q2_return: f64,
    pub q3_return: f64,
    pub q4_return: f64,
    pub ytd_average: f64,
}

impl QuarterlyReturns {
    pub fn quarters(&self) -> [(&'static str, f64); 4] {
        [
            ("Q1", self.q1_return),
            ("Q2", self.q2_return),
            ("Q3", self.q3_return),
            ("Q4", self.q4_return),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Insight {
    pub title: String,
    pub description: String,
    /// Card style: `positive`, `warning`, `info`
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_round_trip() {
        for period in Period::ALL {
            assert_eq!(Period::parse(period.as_str()), Some(period));
        }
        assert_eq!(Period::parse("YTD"), Some(Period::YearToDate));
        assert_eq!(Period::parse("5y"), None);
        assert_eq!(Period::default().as_str(), "12m");
    }

    #[test]
    fn partial_snapshot_deserializes() {
        let snapshot: AnalyticsDashboard = serde_json::from_value(serde_json::json!({
            "keyStats": { "totalAssets": 152195.67, "totalAssetsTrend": "up", "onTrackScore": 87 },
            "quarterlyReturns": { "q1Return": 2.1, "q2Return": 3.4 },
            "insights": [{ "title": "Great", "description": "Keep going", "type": "positive", "icon": "check" }]
        }))
        .unwrap();

        assert_eq!(snapshot.key_stats.on_track_score, 87);
        assert!(snapshot.savings_growth.is_empty());
        assert_eq!(snapshot.quarterly_returns.quarters()[1], ("Q2", 3.4));
        assert_eq!(snapshot.insights[0].kind, "positive");
    }
}
