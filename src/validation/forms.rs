// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule sets for each form the dashboard submits.

use super::rules::{AGE, EMAIL, NAME, PASSWORD, RETIREMENT_AGE, USERNAME, YEARS};
use super::{validate_form, validate_retirement_age, FormValidation, FormValues, Rule};

pub const REGISTRATION: &[(&str, Rule)] = &[
    ("username", USERNAME),
    ("password", PASSWORD),
    ("firstName", NAME),
    ("lastName", NAME),
    ("email", EMAIL),
];

pub const LOGIN: &[(&str, Rule)] = &[("username", USERNAME), ("password", PASSWORD)];

pub const RETIREMENT_ACCOUNT: &[(&str, Rule)] = &[
    (
        "accountName",
        Rule {
            required: true,
            min_length: Some(1),
            max_length: Some(100),
            message: Some("Account name is required"),
            ..Rule::OPTIONAL
        },
    ),
    (
        "accountType",
        Rule {
            message: Some("Account type is required"),
            ..Rule::REQUIRED
        },
    ),
    (
        "currentBalance",
        Rule::range(0.0, 10_000_000.0, "Current balance must be between $0 and $10,000,000"),
    ),
];

pub const CONTRIBUTION: &[(&str, Rule)] = &[
    (
        "contributionType",
        Rule {
            message: Some("Contribution type is required"),
            ..Rule::REQUIRED
        },
    ),
    (
        "monthlyAmount",
        Rule::range(0.0, 50_000.0, "Monthly amount must be between $0 and $50,000"),
    ),
    (
        "percentage",
        Rule {
            required: false,
            ..Rule::range(0.0, 100.0, "Percentage must be between 0% and 100%")
        },
    ),
];

pub const RETIREMENT_CALCULATOR: &[(&str, Rule)] = &[
    ("currentAge", AGE),
    ("retirementAge", RETIREMENT_AGE),
    (
        "currentBalance",
        Rule::range(0.0, 10_000_000.0, "Current savings must be between $0 and $10,000,000"),
    ),
    (
        "monthlyContribution",
        Rule::range(0.0, 50_000.0, "Monthly contribution must be between $0 and $50,000"),
    ),
    (
        "annualReturn",
        Rule::range(1.0, 50.0, "Annual return must be between 1% and 50%"),
    ),
];

pub const SOCIAL_SECURITY: &[(&str, Rule)] = &[
    (
        "annualIncome",
        Rule::range(0.0, 1_000_000.0, "Annual income must be between $0 and $1,000,000"),
    ),
    ("yearsWorked", YEARS),
];

pub fn validate_registration(values: &FormValues) -> FormValidation {
    validate_form(values, REGISTRATION)
}

pub fn validate_login(values: &FormValues) -> FormValidation {
    validate_form(values, LOGIN)
}

pub fn validate_retirement_account(values: &FormValues) -> FormValidation {
    validate_form(values, RETIREMENT_ACCOUNT)
}

pub fn validate_contribution(values: &FormValues) -> FormValidation {
    validate_form(values, CONTRIBUTION)
}

/// Per-field pass plus the retirement-age > current-age check.
pub fn validate_retirement_calculator(values: &FormValues) -> FormValidation {
    let mut result = validate_form(values, RETIREMENT_CALCULATOR);
    let age_errors = validate_retirement_age(
        values.get("currentAge").map(String::as_str),
        values.get("retirementAge").map(String::as_str),
    );
    result.reject("retirementAge", age_errors);
    result
}

pub fn validate_social_security(values: &FormValues) -> FormValidation {
    validate_form(values, SOCIAL_SECURITY)
}
