// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML rendering of the page.

use super::escape;
use super::page::{FormState, Modal, NoticeKind, Page, Region, Section, TabGroup};
use crate::models::{BillingFrequency, Period};
use crate::services::{HealthStatus, Service};

pub const ACCOUNT_FORM: &str = "new-account-form";
pub const CONTRIBUTION_FORM: &str = "new-contribution-form";
pub const RETIREMENT_CALCULATOR_FORM: &str = "retirement-calculator-form";
pub const SOCIAL_SECURITY_FORM: &str = "social-security-form";
pub const PAYMENT_METHOD_FORM: &str = "payment-method-form";
pub const FREQUENCY_FORM: &str = "frequency-form";

const ACCOUNT_TYPES: [(&str, &str); 5] = [
    ("401a", "401(a)"),
    ("401k", "401(k)"),
    ("403b", "403(b)"),
    ("IRA", "Traditional IRA"),
    ("Roth IRA", "Roth IRA"),
];

const CONTRIBUTION_TYPES: [(&str, &str); 3] = [
    ("pre_tax", "Pre-tax"),
    ("roth", "Roth"),
    ("employer_match", "Employer Match"),
];

const PAYMENT_TYPES: [(&str, &str); 3] = [
    ("CREDIT_CARD", "Credit Card"),
    ("DEBIT_CARD", "Debit Card"),
    ("BANK_ACCOUNT", "Bank Account"),
];

/// Input kinds used by the dashboard forms.
enum Input<'a> {
    Text,
    Number(&'a str),
    Select(&'a [(&'a str, &'a str)]),
}

impl Page {
    /// Render the whole document.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(16 * 1024);
        html.push_str(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>Finova Retirement</title>\n</head>\n<body>\n",
        );
        html.push_str(&self.render_header());
        html.push_str("<main class=\"main-content\">\n");
        if let Some(notice) = &self.notice {
            let class = match notice.kind {
                NoticeKind::Success => "notice success",
                NoticeKind::Error => "notice error",
            };
            html.push_str(&format!(
                "<div class=\"{}\" role=\"status\">{}</div>\n",
                class,
                escape(&notice.message)
            ));
        }
        if self.authenticated {
            html.push_str(&self.render_section());
        } else {
            html.push_str(LOGIN_PROMPT);
        }
        html.push_str("</main>\n");
        if self.authenticated {
            if let Some(modal) = self.modal {
                html.push_str(&self.render_modal(modal));
            }
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_header(&self) -> String {
        let mut nav = String::new();
        for section in Section::ALL {
            let active = if self.authenticated && section == self.section {
                " active"
            } else {
                ""
            };
            if self.authenticated {
                nav.push_str(&format!(
                    "<a class=\"nav-link{}\" data-section=\"{}\" href=\"/section/{}\">{}</a>\n",
                    active,
                    section.name(),
                    section.name(),
                    section.title()
                ));
            } else {
                nav.push_str(&format!(
                    "<span class=\"nav-link inert\" data-section=\"{}\" aria-disabled=\"true\">{}</span>\n",
                    section.name(),
                    section.title()
                ));
            }
        }

        let (status_class, banner) = match &self.health {
            Some(report) if report.up_count() == report.total() => ("all-up", report.banner()),
            Some(report) => ("some-down", report.banner()),
            None => ("checking", "Checking services...".to_string()),
        };

        let actions = match (&self.user, self.authenticated) {
            (Some(user), true) => {
                let roles = if user.roles.is_empty() {
                    "None".to_string()
                } else {
                    user.roles.join(", ")
                };
                format!(
                    "<div class=\"user-info\">\n\
                     <span class=\"user-greeting\">Welcome, {name}</span>\n\
                     <div class=\"user-menu\">\n\
                     <div class=\"user-dropdown-item\"><strong>{name}</strong><br><small>{email}</small></div>\n\
                     <div class=\"user-dropdown-item\"><strong>Roles:</strong> {roles}</div>\n\
                     <form method=\"post\" action=\"/logout\"><button class=\"logout-btn\" type=\"submit\">Logout</button></form>\n\
                     </div>\n</div>\n",
                    name = escape(user.display_name()),
                    email = escape(user.email.as_deref().unwrap_or_default()),
                    roles = escape(&roles),
                )
            }
            (None, true) => "<form method=\"post\" action=\"/logout\"><button class=\"logout-btn\" type=\"submit\">Logout</button></form>\n".to_string(),
            _ => "<a class=\"login-btn\" href=\"/login\">Login with SSO</a>\n".to_string(),
        };

        format!(
            "<header class=\"header\">\n\
             <div class=\"logo\"><div class=\"logo-icon\">F</div><h1>Finova Retirement</h1></div>\n\
             <nav class=\"nav\">\n{}</nav>\n\
             <div id=\"service-status\" class=\"service-status {}\">{}</div>\n\
             <div class=\"header-actions\">\n{}</div>\n\
             </header>\n",
            nav,
            status_class,
            escape(&banner),
            actions
        )
    }

    fn region_html(&self, region: Region) -> String {
        format!(
            "<div id=\"{}\" class=\"region\">{}</div>\n",
            region.id(),
            self.region(region).unwrap_or_default()
        )
    }

    fn render_section(&self) -> String {
        let body = match self.section {
            Section::Dashboard => self.render_dashboard(),
            Section::Accounts => self.render_accounts(),
            Section::Planning => self.render_planning(),
            Section::Payments => self.render_payments(),
            Section::Analytics => self.render_analytics(),
            Section::Services => self.render_services(),
        };
        format!(
            "<section id=\"{}-section\" class=\"section active\">\n<h2>{}</h2>\n{}</section>\n",
            self.section.name(),
            self.section.title(),
            body
        )
    }

    fn render_dashboard(&self) -> String {
        format!(
            "<div class=\"dashboard-cards\">\n\
             <div class=\"card\"><h3>Estimated Monthly Income</h3>{}</div>\n\
             <div class=\"card\"><h3>Current Balance</h3>{}</div>\n\
             <div class=\"card\"><h3>Retirement Status</h3>{}</div>\n\
             </div>\n\
             <div class=\"quick-actions\">\n\
             <a class=\"action-button\" href=\"/section/accounts\">View Accounts</a>\n\
             <a class=\"action-button\" href=\"/section/planning\">Plan Retirement</a>\n\
             <a class=\"action-button\" href=\"/section/services\">Service Status</a>\n\
             </div>\n",
            self.region_html(Region::MonthlyIncome),
            self.region_html(Region::CurrentBalance),
            self.region_html(Region::RetirementStatus)
        )
    }

    fn render_tabs(&self, group: TabGroup) -> String {
        let active = self.active_tab(group);
        let mut html = format!("<div class=\"tabs {}-tabs\">\n", group.name());
        for (name, label) in group.tabs() {
            html.push_str(&format!(
                "<a class=\"tab-btn{}\" data-tab=\"{}\" href=\"/tabs/{}/{}\">{}</a>\n",
                if *name == active { " active" } else { "" },
                name,
                group.name(),
                name,
                label
            ));
        }
        html.push_str("</div>\n");
        html
    }

    fn render_accounts(&self) -> String {
        let mut html = self.render_tabs(TabGroup::Account);
        let content = match self.active_tab(TabGroup::Account) {
            "manage-accounts" => format!(
                "<a class=\"btn btn-primary\" id=\"add-account-btn\" href=\"/modals/add-account\">Add Account</a>\n{}",
                self.region_html(Region::AccountsList)
            ),
            "manage-contributions" => format!(
                "<a class=\"btn btn-primary\" id=\"add-contribution-btn\" href=\"/modals/add-contribution\">Add Contribution</a>\n{}",
                self.region_html(Region::ContributionsList)
            ),
            _ => format!(
                "<div class=\"card\"><h3>Retirement Accounts</h3>{}</div>\n\
                 <div class=\"card\"><h3>Contributions</h3>{}</div>\n\
                 <div class=\"card\"><h3>Income Sources</h3>{}</div>\n",
                self.region_html(Region::RetirementAccounts),
                self.region_html(Region::ContributionsSummary),
                self.region_html(Region::IncomeSources)
            ),
        };
        html.push_str(&format!("<div class=\"tab-content active\">\n{}</div>\n", content));
        html
    }

    fn render_planning(&self) -> String {
        let mut html = self.render_tabs(TabGroup::Planning);
        let content = match self.active_tab(TabGroup::Planning) {
            "calculator" => {
                let fields = [
                    ("currentAge", "Current Age", Input::Number("1")),
                    ("retirementAge", "Retirement Age", Input::Number("1")),
                    ("currentBalance", "Current Savings ($)", Input::Number("0.01")),
                    ("monthlyContribution", "Monthly Contribution ($)", Input::Number("0.01")),
                    ("annualReturn", "Expected Annual Return (%)", Input::Number("0.1")),
                ];
                format!(
                    "{}{}",
                    self.render_form(
                        RETIREMENT_CALCULATOR_FORM,
                        "/calculators/retirement",
                        &fields,
                        "Calculate"
                    ),
                    self.region_html(Region::CalculatorOutput)
                )
            }
            "social-security" => {
                let fields = [
                    ("annualIncome", "Annual Income ($)", Input::Number("0.01")),
                    ("yearsWorked", "Years Worked", Input::Number("1")),
                ];
                format!(
                    "{}{}",
                    self.render_form(
                        SOCIAL_SECURITY_FORM,
                        "/calculators/social-security",
                        &fields,
                        "Estimate Benefits"
                    ),
                    self.region_html(Region::SocialSecurityResults)
                )
            }
            "scenarios" => format!(
                "<form method=\"post\" action=\"/planning/scenarios\">\
                 <button class=\"btn btn-primary\" id=\"load-scenarios-btn\" type=\"submit\">Load What-If Scenarios</button></form>\n{}",
                self.region_html(Region::Scenarios)
            ),
            _ => format!(
                "<div class=\"card\"><h3>Retirement Plan</h3>{}</div>\n\
                 <div class=\"card\"><h3>Social Security</h3>{}</div>\n\
                 <div class=\"card\"><h3>Investment Strategy</h3>{}</div>\n",
                self.region_html(Region::RetirementPlan),
                self.region_html(Region::SocialSecurity),
                self.region_html(Region::InvestmentStrategy)
            ),
        };
        html.push_str(&format!("<div class=\"tab-content active\">\n{}</div>\n", content));
        html
    }

    fn render_payments(&self) -> String {
        format!(
            "<div class=\"subscription-card\">{}</div>\n\
             <div class=\"card\"><h3>Payment History</h3>{}</div>\n",
            self.region_html(Region::SubscriptionCard),
            self.region_html(Region::PaymentHistory)
        )
    }

    fn render_analytics(&self) -> String {
        let mut selector = String::from("<div class=\"time-selector\">\n");
        for period in Period::ALL {
            selector.push_str(&format!(
                "<a class=\"time-button{}\" data-period=\"{}\" href=\"/analytics?period={}\">{}</a>\n",
                if period == self.period { " active" } else { "" },
                period.as_str(),
                period.as_str(),
                period.label()
            ));
        }
        selector.push_str("</div>\n");

        format!(
            "{}<div class=\"stats-grid\">{}</div>\n\
             <div class=\"chart-grid\">\n\
             <div class=\"chart-card\"><h3>Savings Growth</h3>{}</div>\n\
             <div class=\"chart-card\"><h3>Contribution Breakdown</h3>{}</div>\n\
             <div class=\"chart-card\"><h3>Account Breakdown</h3>{}</div>\n\
             </div>\n\
             <div class=\"card\"><h3>Quarterly Returns</h3>{}</div>\n\
             <div class=\"card\"><h3>Insights</h3>{}</div>\n",
            selector,
            self.region_html(Region::StatsGrid),
            self.region_html(Region::SavingsGrowthChart),
            self.region_html(Region::ContributionChart),
            self.region_html(Region::AccountChart),
            self.region_html(Region::QuarterlyReturns),
            self.region_html(Region::Insights)
        )
    }

    fn render_services(&self) -> String {
        let mut html = String::from("<div class=\"services-grid\">\n");
        for service in Service::ALL {
            let status = self.health.as_ref().and_then(|r| r.status(service));
            let (dot, text, endpoint) = match status {
                Some(HealthStatus::Up { endpoint, .. }) => {
                    ("up", "Running ✓".to_string(), endpoint.as_str())
                }
                Some(HealthStatus::Down { error }) => ("down", format!("Error: {}", error), ""),
                None => ("", "Checking...".to_string(), ""),
            };
            html.push_str(&format!(
                "<div class=\"service-card\" id=\"{}-service-card\">\n\
                 <h3>{}</h3>\n\
                 <span class=\"status-dot {}\"></span><span class=\"status-text\">{}</span>\n",
                service.name(),
                service.label(),
                dot,
                escape(&text)
            ));
            if !endpoint.is_empty() {
                html.push_str(&format!(
                    "<small class=\"endpoint\">{}</small>\n",
                    escape(endpoint)
                ));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
        if let Some(report) = &self.health {
            html.push_str(&format!(
                "<p class=\"last-checked\">Last checked {}</p>\n",
                report.checked_at.format("%H:%M:%S UTC")
            ));
        }
        html
    }

    fn render_modal(&self, modal: Modal) -> String {
        let (title, body) = match modal {
            Modal::AddAccount => {
                let fields = [
                    ("accountName", "Account Name", Input::Text),
                    ("accountType", "Account Type", Input::Select(&ACCOUNT_TYPES)),
                    ("currentBalance", "Current Balance ($)", Input::Number("0.01")),
                    ("employer", "Employer", Input::Text),
                ];
                (
                    "Add Retirement Account",
                    self.render_form(ACCOUNT_FORM, "/accounts", &fields, "Create Account"),
                )
            }
            Modal::AddContribution => {
                let fields = [
                    ("contributionType", "Contribution Type", Input::Select(&CONTRIBUTION_TYPES)),
                    ("monthlyAmount", "Monthly Amount ($)", Input::Number("0.01")),
                    ("percentage", "Percentage of Salary (%)", Input::Number("0.01")),
                ];
                (
                    "Add Contribution",
                    self.render_form(CONTRIBUTION_FORM, "/contributions", &fields, "Create Contribution"),
                )
            }
            Modal::PaymentMethod => {
                let fields = [
                    ("type", "Payment Type", Input::Select(&PAYMENT_TYPES)),
                    ("holderName", "Cardholder Name", Input::Text),
                    ("last4", "Last 4 Digits", Input::Text),
                    ("brand", "Card Brand", Input::Text),
                ];
                (
                    "Change Payment Method",
                    self.render_form(PAYMENT_METHOD_FORM, "/payments/method", &fields, "Update Payment Method"),
                )
            }
            Modal::Frequency => {
                let options: Vec<(&str, &str)> = BillingFrequency::ALL
                    .iter()
                    .map(|f| (f.as_str(), f.description()))
                    .collect();
                let fields = [("frequency", "Billing Frequency", Input::Select(&options))];
                (
                    "Update Billing Frequency",
                    self.render_form(FREQUENCY_FORM, "/payments/frequency", &fields, "Update Frequency"),
                )
            }
            Modal::Cancel => (
                "Pause or Cancel Subscription",
                "<p>Pausing keeps your plan on file. Cancelling cannot be undone.</p>\n\
                 <form method=\"post\" action=\"/payments/pause\"><button class=\"btn\" type=\"submit\">Pause Subscription</button></form>\n\
                 <form method=\"post\" action=\"/payments/cancel\"><button class=\"btn btn-danger\" type=\"submit\">Cancel Subscription</button></form>\n"
                    .to_string(),
            ),
        };

        format!(
            "<div class=\"form-modal active\" role=\"dialog\">\n<div class=\"modal-content\">\n\
             <h3>{}</h3>\n<a class=\"close-modal\" href=\"/modals/close\">&times;</a>\n{}</div>\n</div>\n",
            title, body
        )
    }

    fn render_form(
        &self,
        form: &'static str,
        action: &str,
        fields: &[(&str, &str, Input<'_>)],
        submit: &str,
    ) -> String {
        let state = self.form(form);
        let mut html = format!(
            "<form id=\"{}\" method=\"post\" action=\"{}\" novalidate>\n",
            form, action
        );
        for (name, label, input) in fields {
            html.push_str(&render_field(state, name, label, input, self.prefill(form, name)));
        }
        html.push_str(&format!(
            "<button class=\"btn btn-primary\" type=\"submit\">{}</button>\n</form>\n",
            submit
        ));
        html
    }

    /// Default value for a form field before anything was submitted.
    fn prefill(&self, form: &str, field: &str) -> Option<String> {
        match (form, field) {
            (FREQUENCY_FORM, "frequency") => self
                .subscription
                .as_ref()
                .map(|s| s.frequency.as_str().to_string()),
            _ => None,
        }
    }
}

fn render_field(
    state: Option<&FormState>,
    name: &str,
    label: &str,
    input: &Input<'_>,
    prefill: Option<String>,
) -> String {
    let value = state
        .and_then(|s| s.values.get(name).cloned())
        .or(prefill)
        .unwrap_or_default();
    let errors = state.and_then(|s| s.errors.get(name));
    let class = if errors.is_some() { "form-group has-error" } else { "form-group" };

    let control = match input {
        Input::Text => format!(
            "<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\">",
            escape(&value)
        ),
        Input::Number(step) => format!(
            "<input type=\"number\" step=\"{}\" id=\"{name}\" name=\"{name}\" value=\"{}\">",
            step,
            escape(&value)
        ),
        Input::Select(options) => {
            let mut html = format!("<select id=\"{name}\" name=\"{name}\">");
            for (option, text) in options.iter() {
                html.push_str(&format!(
                    "<option value=\"{}\"{}>{}</option>",
                    escape(option),
                    if *option == value { " selected" } else { "" },
                    escape(text)
                ));
            }
            html.push_str("</select>");
            html
        }
    };

    let mut html = format!(
        "<div class=\"{}\">\n<label for=\"{name}\">{}</label>\n{}\n",
        class,
        escape(label),
        control
    );
    for message in errors.into_iter().flatten() {
        html.push_str(&format!(
            "<span class=\"field-error\" data-field=\"{name}\">{}</span>\n",
            escape(message)
        ));
    }
    html.push_str("</div>\n");
    html
}

const LOGIN_PROMPT: &str = "<section id=\"login-section\" class=\"section active\">\n\
<div class=\"login-container\">\n<div class=\"login-card\">\n\
<div class=\"login-header\">\n<div class=\"logo-large\"><div class=\"logo-icon\">F</div><h1>Finova Retirement</h1></div>\n\
<p>Please login to access your retirement planning dashboard</p>\n</div>\n\
<div class=\"login-content\">\n\
<a class=\"sso-login-btn\" href=\"/login\">Login with Single Sign-On</a>\n\
<div class=\"login-features\">\n\
<div class=\"feature-item\">Secure Authentication</div>\n\
<div class=\"feature-item\">Personalized Planning</div>\n\
<div class=\"feature-item\">Role-Based Access</div>\n\
</div>\n</div>\n</div>\n</div>\n</section>\n";
