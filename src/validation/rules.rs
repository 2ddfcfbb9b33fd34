// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule shape, value patterns, and the standard rule table.

use regex::Regex;
use std::sync::LazyLock;

/// Static validation rule for one form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<Pattern>,
    /// Message reported when the pattern does not match
    pub message: Option<&'static str>,
}

impl Rule {
    /// No constraints at all; the base for struct-update syntax.
    pub const OPTIONAL: Rule = Rule {
        required: false,
        min_length: None,
        max_length: None,
        min: None,
        max: None,
        pattern: None,
        message: None,
    };

    /// Required field with no further constraints.
    pub const REQUIRED: Rule = Rule {
        required: true,
        ..Rule::OPTIONAL
    };

    /// Required number within `[min, max]`.
    pub const fn range(min: f64, max: f64, message: &'static str) -> Rule {
        Rule {
            required: true,
            min: Some(min),
            max: Some(max),
            message: Some(message),
            ..Rule::OPTIONAL
        }
    }
}

/// Shape a field value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Letters, digits, `.`, `_`, `-`
    Username,
    /// At least one lowercase, uppercase, digit and one of `@$!%*?&`
    Password,
    /// Letters, whitespace, apostrophes, hyphens
    PersonName,
    /// `local@domain.tld` with no whitespace and a single `@`
    Email,
    /// E.164-style: optional `+`, 2-15 digits, no leading zero
    Phone,
}

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("username regex is valid"));

static PERSON_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name regex is valid"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{1,14}$").expect("phone regex is valid"));

/// The password's first character, then one check per required class.
static PASSWORD_RES: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        r"^[A-Za-z0-9@$!%*?&]",
        r"[a-z]",
        r"[A-Z]",
        r"[0-9]",
        r"[@$!%*?&]",
    ]
    .map(|re| Regex::new(re).expect("password regex is valid"))
});

impl Pattern {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::Username => USERNAME_RE.is_match(value),
            Pattern::Password => PASSWORD_RES.iter().all(|re| re.is_match(value)),
            Pattern::PersonName => PERSON_NAME_RE.is_match(value),
            Pattern::Email => EMAIL_RE.is_match(value),
            Pattern::Phone => PHONE_RE.is_match(value),
        }
    }
}

pub const USERNAME: Rule = Rule {
    required: true,
    min_length: Some(3),
    max_length: Some(50),
    pattern: Some(Pattern::Username),
    message: Some(
        "Username must be 3-50 characters and contain only letters, numbers, dots, underscores, and hyphens",
    ),
    ..Rule::OPTIONAL
};

pub const PASSWORD: Rule = Rule {
    required: true,
    min_length: Some(8),
    max_length: Some(128),
    pattern: Some(Pattern::Password),
    message: Some(
        "Password must be 8-128 characters with at least one lowercase letter, one uppercase letter, one digit, and one special character",
    ),
    ..Rule::OPTIONAL
};

pub const NAME: Rule = Rule {
    required: true,
    min_length: Some(1),
    max_length: Some(50),
    pattern: Some(Pattern::PersonName),
    message: Some("Name can only contain letters, spaces, apostrophes, and hyphens"),
    ..Rule::OPTIONAL
};

pub const EMAIL: Rule = Rule {
    required: true,
    max_length: Some(100),
    pattern: Some(Pattern::Email),
    message: Some("Please enter a valid email address"),
    ..Rule::OPTIONAL
};

pub const PHONE: Rule = Rule {
    pattern: Some(Pattern::Phone),
    message: Some("Please enter a valid phone number"),
    ..Rule::OPTIONAL
};

pub const CURRENCY: Rule = Rule::range(0.0, 10_000_000.0, "Amount must be between $0 and $10,000,000");

pub const PERCENTAGE: Rule = Rule::range(0.0, 100.0, "Percentage must be between 0% and 100%");

pub const AGE: Rule = Rule::range(18.0, 100.0, "Age must be between 18 and 100");

pub const RETIREMENT_AGE: Rule = Rule::range(55.0, 75.0, "Retirement age must be between 55 and 75");

pub const YEARS: Rule = Rule::range(0.0, 50.0, "Years must be between 0 and 50");
