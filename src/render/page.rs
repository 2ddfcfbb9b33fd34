// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Render-tree state.

use crate::error::{AppError, Result};
use crate::models::{Period, Subscription, UserProfile};
use crate::services::SweepReport;
use crate::validation::{FieldErrors, FormValues};
use std::collections::{BTreeMap, HashMap};

/// Top-level navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Accounts,
    Planning,
    Payments,
    Analytics,
    Services,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::Accounts,
        Section::Planning,
        Section::Payments,
        Section::Analytics,
        Section::Services,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Accounts => "accounts",
            Section::Planning => "planning",
            Section::Payments => "payments",
            Section::Analytics => "analytics",
            Section::Services => "services",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Accounts => "Accounts",
            Section::Planning => "Planning",
            Section::Payments => "Payments",
            Section::Analytics => "Analytics",
            Section::Services => "Services",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name() == raw)
            .ok_or_else(|| AppError::NotFound(format!("section {}", raw)))
    }
}

/// Named content slot inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    MonthlyIncome,
    CurrentBalance,
    RetirementStatus,
    RetirementAccounts,
    ContributionsSummary,
    IncomeSources,
    AccountsList,
    ContributionsList,
    RetirementPlan,
    SocialSecurity,
    InvestmentStrategy,
    Scenarios,
    CalculatorOutput,
    SocialSecurityResults,
    SubscriptionCard,
    PaymentHistory,
    StatsGrid,
    SavingsGrowthChart,
    ContributionChart,
    AccountChart,
    QuarterlyReturns,
    Insights,
}

impl Region {
    pub const ALL: [Region; 22] = [
        Region::MonthlyIncome,
        Region::CurrentBalance,
        Region::RetirementStatus,
        Region::RetirementAccounts,
        Region::ContributionsSummary,
        Region::IncomeSources,
        Region::AccountsList,
        Region::ContributionsList,
        Region::RetirementPlan,
        Region::SocialSecurity,
        Region::InvestmentStrategy,
        Region::Scenarios,
        Region::CalculatorOutput,
        Region::SocialSecurityResults,
        Region::SubscriptionCard,
        Region::PaymentHistory,
        Region::StatsGrid,
        Region::SavingsGrowthChart,
        Region::ContributionChart,
        Region::AccountChart,
        Region::QuarterlyReturns,
        Region::Insights,
    ];

    /// Element id in the rendered document.
    pub fn id(self) -> &'static str {
        match self {
            Region::MonthlyIncome => "monthly-income",
            Region::CurrentBalance => "current-balance",
            Region::RetirementStatus => "retirement-status",
            Region::RetirementAccounts => "retirement-accounts",
            Region::ContributionsSummary => "contributions-summary",
            Region::IncomeSources => "income-sources",
            Region::AccountsList => "accounts-list",
            Region::ContributionsList => "contributions-list",
            Region::RetirementPlan => "retirement-plan",
            Region::SocialSecurity => "social-security",
            Region::InvestmentStrategy => "investment-strategy",
            Region::Scenarios => "scenarios-results",
            Region::CalculatorOutput => "calculator-output",
            Region::SocialSecurityResults => "social-security-results",
            Region::SubscriptionCard => "subscription-card",
            Region::PaymentHistory => "payment-history",
            Region::StatsGrid => "stats-grid",
            Region::SavingsGrowthChart => "savings-growth-chart",
            Region::ContributionChart => "contribution-chart",
            Region::AccountChart => "account-chart",
            Region::QuarterlyReturns => "quarterly-returns",
            Region::Insights => "insights-grid",
        }
    }

    pub fn section(self) -> Section {
        match self {
            Region::MonthlyIncome | Region::CurrentBalance | Region::RetirementStatus => {
                Section::Dashboard
            }
            Region::RetirementAccounts
            | Region::ContributionsSummary
            | Region::IncomeSources
            | Region::AccountsList
            | Region::ContributionsList => Section::Accounts,
            Region::RetirementPlan
            | Region::SocialSecurity
            | Region::InvestmentStrategy
            | Region::Scenarios
            | Region::CalculatorOutput
            | Region::SocialSecurityResults => Section::Planning,
            Region::SubscriptionCard | Region::PaymentHistory => Section::Payments,
            Region::StatsGrid
            | Region::SavingsGrowthChart
            | Region::ContributionChart
            | Region::AccountChart
            | Region::QuarterlyReturns
            | Region::Insights => Section::Analytics,
        }
    }

    /// Regions filled on every section load. The rest stay empty until the
    /// user asks for them (calculators, scenarios) or the data allows it.
    pub fn is_loaded(self) -> bool {
        !matches!(
            self,
            Region::Scenarios
                | Region::CalculatorOutput
                | Region::SocialSecurityResults
                | Region::SavingsGrowthChart
                | Region::ContributionChart
                | Region::AccountChart
                | Region::QuarterlyReturns
                | Region::Insights
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabGroup {
    Planning,
    Account,
}

impl TabGroup {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "planning" => Ok(TabGroup::Planning),
            "account" => Ok(TabGroup::Account),
            _ => Err(AppError::NotFound(format!("tab group {}", raw))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TabGroup::Planning => "planning",
            TabGroup::Account => "account",
        }
    }

    /// Tabs in display order; the first is the default.
    pub fn tabs(self) -> &'static [(&'static str, &'static str)] {
        match self {
            TabGroup::Planning => &[
                ("overview", "Overview"),
                ("calculator", "Calculator"),
                ("social-security", "Social Security"),
                ("scenarios", "What-If Scenarios"),
            ],
            TabGroup::Account => &[
                ("overview", "Overview"),
                ("manage-accounts", "Manage Accounts"),
                ("manage-contributions", "Manage Contributions"),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    AddAccount,
    AddContribution,
    PaymentMethod,
    Frequency,
    Cancel,
}

impl Modal {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "add-account" => Ok(Modal::AddAccount),
            "add-contribution" => Ok(Modal::AddContribution),
            "payment-method" => Ok(Modal::PaymentMethod),
            "frequency" => Ok(Modal::Frequency),
            "cancel" => Ok(Modal::Cancel),
            _ => Err(AppError::NotFound(format!("modal {}", raw))),
        }
    }

    pub fn section(self) -> Section {
        match self {
            Modal::AddAccount | Modal::AddContribution => Section::Accounts,
            Modal::PaymentMethod | Modal::Frequency | Modal::Cancel => Section::Payments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot message shown above the active section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Submitted values and their errors, kept for re-rendering a rejected form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub values: FormValues,
    pub errors: FieldErrors,
}

/// Everything the shell renders.
#[derive(Debug, Default)]
pub struct Page {
    pub(crate) user: Option<UserProfile>,
    pub(crate) authenticated: bool,
    pub(crate) section: Section,
    pub(crate) tabs: HashMap<TabGroup, &'static str>,
    pub(crate) modal: Option<Modal>,
    pub(crate) regions: HashMap<Region, String>,
    pub(crate) forms: BTreeMap<&'static str, FormState>,
    pub(crate) notice: Option<Notice>,
    pub(crate) health: Option<SweepReport>,
    pub(crate) subscription: Option<Subscription>,
    pub(crate) period: Period,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Login prompt with inert navigation. Domain content is dropped.
    pub fn show_login(&mut self) {
        self.user = None;
        self.authenticated = false;
        self.section = Section::Dashboard;
        self.modal = None;
        self.regions.clear();
        self.forms.clear();
        self.subscription = None;
        self.tabs.clear();
    }

    /// Header with the user menu, navigation enabled, dashboard active.
    pub fn show_app(&mut self, user: Option<UserProfile>) {
        self.user = user;
        self.authenticated = true;
        self.section = Section::Dashboard;
        self.modal = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn navigate(&mut self, section: Section) {
        self.section = section;
        self.modal = None;
    }

    pub fn select_tab(&mut self, group: TabGroup, tab: &str) -> Result<()> {
        let (name, _) = group
            .tabs()
            .iter()
            .find(|(name, _)| *name == tab)
            .ok_or_else(|| AppError::NotFound(format!("tab {}", tab)))?;
        self.tabs.insert(group, name);
        Ok(())
    }

    pub fn active_tab(&self, group: TabGroup) -> &'static str {
        self.tabs
            .get(&group)
            .copied()
            .unwrap_or(group.tabs()[0].0)
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.section = modal.section();
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    pub fn set_region(&mut self, region: Region, html: String) {
        self.regions.insert(region, html);
    }

    pub fn region(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }

    pub fn clear_region(&mut self, region: Region) {
        self.regions.remove(&region);
    }

    /// Loaded regions of `section` that hold no content.
    pub fn empty_regions(&self, section: Section) -> Vec<Region> {
        Region::ALL
            .into_iter()
            .filter(|r| r.section() == section && r.is_loaded())
            .filter(|r| self.region(*r).map_or(true, |html| html.trim().is_empty()))
            .collect()
    }

    pub fn reject_form(&mut self, form: &'static str, values: FormValues, errors: FieldErrors) {
        self.forms.insert(form, FormState { values, errors });
    }

    /// Keep accepted values so the form re-renders filled in.
    pub fn fill_form(&mut self, form: &'static str, values: FormValues) {
        self.forms.insert(
            form,
            FormState {
                values,
                errors: FieldErrors::new(),
            },
        );
    }

    pub fn clear_form(&mut self, form: &'static str) {
        self.forms.remove(form);
    }

    pub fn form(&self, form: &str) -> Option<&FormState> {
        self.forms.get(form)
    }

    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            message: message.into(),
        });
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Notices show once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn apply_health(&mut self, report: &SweepReport) {
        self.health = Some(report.clone());
    }

    pub fn health(&self) -> Option<&SweepReport> {
        self.health.as_ref()
    }

    pub fn set_subscription(&mut self, subscription: Option<Subscription>) {
        self.subscription = subscription;
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}
