// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analytics section.
//!
//! Charts are emitted as `<canvas>` elements carrying a JSON chart config in
//! `data-chart`; the page script hands that config to the charting library.

use super::{fallback, recover};
use crate::error::Result;
use crate::format::{format_number, format_percent};
use crate::models::{
    AccountBreakdown, AnalyticsDashboard, ContributionBreakdown, Insight, KeyStats, Period,
    QuarterlyReturns, SavingsGrowthPoint,
};
use crate::render::{escape, Page, Region};
use crate::services::Service;
use crate::AppState;
use serde_json::{json, Value};

const DATA_REGIONS: [Region; 5] = [
    Region::SavingsGrowthChart,
    Region::ContributionChart,
    Region::AccountChart,
    Region::QuarterlyReturns,
    Region::Insights,
];

/// Fetch the snapshot for `period` and replace the whole section with it.
pub async fn load(state: &AppState, period: Period) -> Result<()> {
    let path = format!(
        "/api/analytics/dashboard/{}?period={}",
        state.auth.user_id(),
        period
    );
    let snapshot = recover(
        state
            .api
            .get_json::<AnalyticsDashboard>(Service::Analytics, &path)
            .await,
        "analytics",
    )?;

    let mut page = state.page.write().await;
    page.set_period(period);
    match snapshot {
        Some(snapshot) => render(&mut page, &snapshot),
        None => render_error(&mut page),
    }
    Ok(())
}

pub fn render(page: &mut Page, snapshot: &AnalyticsDashboard) {
    page.set_region(Region::StatsGrid, render_key_stats(&snapshot.key_stats));
    page.set_region(
        Region::SavingsGrowthChart,
        canvas("savings-growth", &savings_growth_chart(&snapshot.savings_growth)),
    );
    page.set_region(
        Region::ContributionChart,
        canvas("contribution", &contribution_chart(&snapshot.contribution_breakdown)),
    );
    page.set_region(
        Region::AccountChart,
        canvas("account", &account_chart(&snapshot.account_breakdown)),
    );
    page.set_region(
        Region::QuarterlyReturns,
        render_quarterly_returns(&snapshot.quarterly_returns),
    );
    page.set_region(Region::Insights, render_insights(&snapshot.insights));
}

/// Error panel in the stats grid; the rest of the previous snapshot is dropped.
pub fn render_error(page: &mut Page) {
    page.set_region(Region::StatsGrid, fallback::ANALYTICS_ERROR.to_string());
    for region in DATA_REGIONS {
        page.clear_region(region);
    }
}

fn arrow(trend: &str) -> &'static str {
    if trend == "up" {
        "up"
    } else {
        "down"
    }
}

fn stat_card(label: &str, trend: Option<(&str, f64)>, value: &str, subtitle: &str) -> String {
    let trend = trend
        .map(|(direction, pct)| {
            format!(
                "<span class=\"stat-trend trend-{}\"><i class=\"arrow-{}\"></i> {}</span>",
                escape(direction),
                arrow(direction),
                format_percent(pct)
            )
        })
        .unwrap_or_default();
    format!(
        "<div class=\"stat-card\"><div class=\"stat-header\"><span class=\"stat-label\">{}</span>{}</div>\
         <div class=\"stat-value\">{}</div><div class=\"stat-subtitle\">{}</div></div>",
        label, trend, value, subtitle
    )
}

pub fn render_key_stats(stats: &KeyStats) -> String {
    [
        stat_card(
            "Total Assets",
            Some((stats.total_assets_trend.as_str(), stats.trend_percentage)),
            &format!("${}", format_number(stats.total_assets)),
            "Total retirement savings",
        ),
        stat_card(
            "Annual Contribution",
            Some((
                stats.annual_contribution_trend.as_str(),
                stats.contribution_trend_percentage,
            )),
            &format!("${}", format_number(stats.annual_contribution)),
            "Combined contributions YTD",
        ),
        stat_card(
            "YTD Return",
            Some((stats.ytd_return_trend.as_str(), stats.return_trend_percentage)),
            &format_percent(stats.ytd_return),
            "Year-to-date performance",
        ),
        stat_card(
            "On Track Score",
            None,
            &format!("{}/100", stats.on_track_score),
            &escape(&stats.on_track_status),
        ),
    ]
    .concat()
}

fn canvas(name: &str, chart: &Value) -> String {
    format!(
        "<canvas id=\"{}-canvas\" data-chart=\"{}\"></canvas>",
        name,
        escape(&chart.to_string())
    )
}

pub fn savings_growth_chart(points: &[SavingsGrowthPoint]) -> Value {
    json!({
        "type": "line",
        "data": {
            "labels": points.iter().map(|p| p.month.as_str()).collect::<Vec<_>>(),
            "datasets": [
                {
                    "label": "Actual Balance",
                    "data": points.iter().map(|p| p.actual_balance).collect::<Vec<_>>(),
                    "borderColor": "#4f46e5",
                    "backgroundColor": "rgba(79, 70, 229, 0.1)",
                    "fill": true,
                },
                {
                    "label": "Target Balance",
                    "data": points.iter().map(|p| p.target_balance).collect::<Vec<_>>(),
                    "borderColor": "#94a3b8",
                    "backgroundColor": "transparent",
                    "borderDash": [5, 5],
                },
            ],
        },
    })
}

pub fn contribution_chart(breakdown: &ContributionBreakdown) -> Value {
    json!({
        "type": "doughnut",
        "data": {
            "labels": ["Employee Contributions", "Employer Match", "Previous Balance"],
            "datasets": [{
                "data": [
                    breakdown.employee_contributions,
                    breakdown.employer_match,
                    breakdown.previous_balance,
                ],
                "backgroundColor": ["#4f46e5", "#06b6d4", "#10b981"],
                "borderWidth": 0,
            }],
        },
    })
}

pub fn account_chart(accounts: &[AccountBreakdown]) -> Value {
    json!({
        "type": "bar",
        "data": {
            "labels": accounts.iter().map(|a| a.account_name.as_str()).collect::<Vec<_>>(),
            "datasets": [{
                "label": "Balance",
                "data": accounts.iter().map(|a| a.balance).collect::<Vec<_>>(),
                "backgroundColor": accounts.iter().map(|a| a.color.as_str()).collect::<Vec<_>>(),
            }],
        },
    })
}

pub fn render_quarterly_returns(returns: &QuarterlyReturns) -> String {
    let mut html: String = returns
        .quarters()
        .iter()
        .map(|(label, value)| {
            format!(
                "<div class=\"quarter-card\"><div class=\"quarter-label\">{}</div>\
                 <div class=\"quarter-value\">{}</div></div>",
                label,
                format_percent(*value)
            )
        })
        .collect();
    html.push_str(&format!(
        "<div class=\"quarter-card highlight\"><div class=\"quarter-label\">YTD Average</div>\
         <div class=\"quarter-value\">{}</div></div>",
        format_percent(returns.ytd_average)
    ));
    html
}

pub fn render_insights(insights: &[Insight]) -> String {
    insights
        .iter()
        .map(|insight| {
            format!(
                "<div class=\"insight-card {}\"><div class=\"insight-icon\" data-icon=\"{}\"></div>\
                 <div class=\"insight-title\">{}</div><div class=\"insight-description\">{}</div></div>",
                escape(&insight.kind),
                escape(&insight.icon),
                escape(&insight.title),
                escape(&insight.description)
            )
        })
        .collect()
}
