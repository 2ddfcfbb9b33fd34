// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Accounts section: balances, contributions, income sources, and the
//! account/contribution creation forms.

use super::{fallback, load_section, recover};
use crate::error::Result;
use crate::format::format_currency;
use crate::models::{
    Account, Contribution, ContributionSummary, IncomeSourceSummary, NewAccount, NewContribution,
};
use crate::render::{escape, NoticeKind, Page, Region, Section, ACCOUNT_FORM, CONTRIBUTION_FORM};
use crate::services::Service;
use crate::validation::forms::{validate_contribution, validate_retirement_account};
use crate::validation::FormValues;
use crate::AppState;

pub async fn load(state: &AppState) -> Result<()> {
    let user_id = state.auth.user_id();
    let accounts_path = format!("/api/accounts/user/{}", user_id);
    let summary_path = format!("/api/contributions/user/{}/summary", user_id);
    let income_path = format!("/api/income-sources/user/{}/summary", user_id);
    let contributions_path = format!("/api/contributions/user/{}", user_id);

    let api = state.api.session();
    let (accounts, summary, income, contributions) = tokio::join!(
        api.get_json::<Vec<Account>>(Service::Account, &accounts_path),
        api.get_json::<ContributionSummary>(Service::Account, &summary_path),
        api.get_json::<IncomeSourceSummary>(Service::Account, &income_path),
        api.get_json::<Vec<Contribution>>(Service::Account, &contributions_path),
    );
    let accounts = recover(accounts, "accounts")?;
    let summary = recover(summary, "contribution summary")?;
    let income = recover(income, "income sources")?;
    let contributions = recover(contributions, "contributions")?;

    let mut page = state.page.write().await;
    render_accounts(&mut page, accounts.as_deref().unwrap_or_default());
    render_summary(&mut page, summary.as_ref());
    render_income(&mut page, income.as_ref());
    render_contributions(&mut page, contributions.as_deref().unwrap_or_default());
    Ok(())
}

/// Account cards and the management list. No accounts shows the sample plan.
pub fn render_accounts(page: &mut Page, accounts: &[Account]) {
    if accounts.is_empty() {
        page.set_region(Region::RetirementAccounts, fallback::RETIREMENT_ACCOUNTS.to_string());
        page.set_region(Region::AccountsList, fallback::ACCOUNTS_LIST.to_string());
        return;
    }

    let mut cards = String::new();
    let mut list = String::new();
    for account in accounts {
        let title = escape(account.title());
        let balance = format_currency(account.current_balance);
        cards.push_str(&format!(
            "<div class=\"account-item\"><strong>{}</strong><br>Balance: {}<br>Status: {}</div>",
            title,
            balance,
            if account.on_track { "On Track" } else { "Behind Schedule" }
        ));
        list.push_str(&format!(
            "<div class=\"account-list-item\"><h4>{}</h4><p>Balance: {}</p><p>Type: {}</p><p>Employer: {}</p></div>",
            title,
            balance,
            escape(account.account_type.as_deref().unwrap_or_default()),
            escape(account.employer.as_deref().unwrap_or("N/A"))
        ));
    }
    page.set_region(Region::RetirementAccounts, cards);
    page.set_region(Region::AccountsList, list);
}

pub fn render_summary(page: &mut Page, summary: Option<&ContributionSummary>) {
    let monthly = summary
        .and_then(|s| s.total_monthly_formatted.as_deref())
        .unwrap_or(fallback::TOTAL_MONTHLY);
    let annual = summary
        .and_then(|s| s.total_annual_formatted.as_deref())
        .unwrap_or(fallback::TOTAL_ANNUAL);
    page.set_region(
        Region::ContributionsSummary,
        fallback::contributions_summary(&escape(monthly), &escape(annual)),
    );
}

pub fn render_income(page: &mut Page, income: Option<&IncomeSourceSummary>) {
    let balance = income
        .and_then(|i| i.total_current_balance)
        .filter(|b| *b != 0.0)
        .unwrap_or(fallback::PRIMARY_401K_BALANCE);
    page.set_region(
        Region::IncomeSources,
        fallback::income_sources(&format_currency(Some(balance))),
    );
}

pub fn render_contributions(page: &mut Page, contributions: &[Contribution]) {
    if contributions.is_empty() {
        page.set_region(Region::ContributionsList, fallback::CONTRIBUTIONS_LIST.to_string());
        return;
    }

    let html: String = contributions
        .iter()
        .map(|c| {
            let percentage = c
                .percentage
                .map(|p| format!("{}%", p))
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "<div class=\"contribution-list-item\"><h4>{}</h4><p>Monthly: {}</p><p>Percentage: {}</p></div>",
                escape(&c.contribution_type),
                format_currency(c.monthly_amount),
                percentage
            )
        })
        .collect();
    page.set_region(Region::ContributionsList, html);
}

fn number(values: &FormValues, field: &str) -> Option<f64> {
    values.get(field).and_then(|v| v.trim().parse().ok())
}

fn text(values: &FormValues, field: &str) -> Option<String> {
    values
        .get(field)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate and submit the add-account form, then reload the section.
pub async fn create_account(state: &AppState, values: FormValues) -> Result<()> {
    let validation = validate_retirement_account(&values);
    if !validation.is_valid {
        state
            .page
            .write()
            .await
            .reject_form(ACCOUNT_FORM, values, validation.errors);
        return Ok(());
    }

    let account = NewAccount {
        user_id: state.auth.user_id(),
        account_name: text(&values, "accountName").unwrap_or_default(),
        account_type: text(&values, "accountType").unwrap_or_default(),
        current_balance: number(&values, "currentBalance").unwrap_or_default(),
        employer: text(&values, "employer"),
    };
    let result = state.api.post(Service::Account, "/api/accounts", &account).await;
    finish_create(state, result, ACCOUNT_FORM, "Account").await
}

/// Validate and submit the add-contribution form, then reload the section.
pub async fn create_contribution(state: &AppState, values: FormValues) -> Result<()> {
    let validation = validate_contribution(&values);
    if !validation.is_valid {
        state
            .page
            .write()
            .await
            .reject_form(CONTRIBUTION_FORM, values, validation.errors);
        return Ok(());
    }

    let contribution = NewContribution {
        user_id: state.auth.user_id(),
        contribution_type: text(&values, "contributionType").unwrap_or_default(),
        monthly_amount: number(&values, "monthlyAmount").unwrap_or_default(),
        percentage: number(&values, "percentage"),
    };
    let result = state
        .api
        .post(Service::Account, "/api/contributions", &contribution)
        .await;
    finish_create(state, result, CONTRIBUTION_FORM, "Contribution").await
}

async fn finish_create(
    state: &AppState,
    result: Result<()>,
    form: &'static str,
    what: &str,
) -> Result<()> {
    match recover(result, "create")? {
        Some(()) => {
            {
                let mut page = state.page.write().await;
                page.clear_form(form);
                page.close_modal();
                page.notify(NoticeKind::Success, format!("{} created successfully!", what));
            }
            load_section(state, Section::Accounts).await
        }
        None => {
            state.page.write().await.notify(
                NoticeKind::Error,
                format!("Failed to create {}. Please try again.", what.to_lowercase()),
            );
            Ok(())
        }
    }
}
