// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Declarative form validation.
//!
//! A [`Rule`] describes one field: required-ness, length bounds, numeric
//! bounds and an optional [`Pattern`]. [`validate_field`] evaluates a single
//! value, [`validate_form`] applies a rule set to a submitted form. Checks
//! that span several fields live alongside as plain functions and are layered
//! on top of the per-field pass by the form validators in [`forms`].

pub mod forms;
pub mod rules;

pub use rules::{Pattern, Rule};

use crate::format::format_percent;
use std::collections::{BTreeMap, HashMap};

/// Failing fields mapped to their ordered messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Submitted form values keyed by field name.
pub type FormValues = HashMap<String, String>;

/// Outcome of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: FieldErrors,
}

impl FormValidation {
    /// Record messages for a field and mark the form invalid.
    ///
    /// Replaces anything the per-field pass reported for that field.
    pub fn reject(&mut self, field: &str, messages: Vec<String>) {
        if messages.is_empty() {
            return;
        }
        self.errors.insert(field.to_string(), messages);
        self.is_valid = false;
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Validate one value against a rule.
///
/// Required-ness is checked first and short-circuits: a missing required
/// value reports exactly one message. An empty optional value is valid.
pub fn validate_field(value: Option<&str>, rule: &Rule, label: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(value) {
        if rule.required {
            errors.push(format!("{} is required", label));
        }
        return errors;
    }
    let value = value.unwrap_or_default();
    let length = value.chars().count();

    if let Some(min) = rule.min_length {
        if length < min {
            errors.push(format!("{} must be at least {} characters", label, min));
        }
    }

    if let Some(max) = rule.max_length {
        if length > max {
            errors.push(format!("{} must not exceed {} characters", label, max));
        }
    }

    if let Some(pattern) = rule.pattern {
        if !pattern.matches(value) {
            errors.push(
                rule.message
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} format is invalid", label)),
            );
        }
    }

    if rule.min.is_some() || rule.max.is_some() {
        match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => {
                if let Some(min) = rule.min {
                    if number < min {
                        errors.push(format!("{} must be at least {}", label, min));
                    }
                }
                if let Some(max) = rule.max {
                    if number > max {
                        errors.push(format!("{} must not exceed {}", label, max));
                    }
                }
            }
            _ => errors.push(format!("{} must be a number", label)),
        }
    }

    errors
}

/// Validate every declared field of a form.
///
/// Fields are labelled by their key, matching how the backend reports them.
pub fn validate_form(values: &FormValues, rules: &[(&str, Rule)]) -> FormValidation {
    let mut result = FormValidation {
        is_valid: true,
        errors: FieldErrors::new(),
    };

    for (field, rule) in rules {
        let messages = validate_field(values.get(*field).map(String::as_str), rule, field);
        result.reject(field, messages);
    }

    result
}

/// Integer part of a form value, as the age fields are entered.
fn parse_whole(value: Option<&str>) -> Option<i64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)
}

/// Retirement age must exceed the current age.
///
/// Only applies when both values are present.
pub fn validate_retirement_age(current_age: Option<&str>, retirement_age: Option<&str>) -> Vec<String> {
    match (parse_whole(current_age), parse_whole(retirement_age)) {
        (Some(current), Some(retirement)) if retirement <= current => {
            vec!["Retirement age must be greater than current age".to_string()]
        }
        _ => Vec::new(),
    }
}

/// Stock/bond/cash percentages must add up to 100 within 0.01.
pub fn validate_allocation(stocks: f64, bonds: f64, cash: f64) -> Vec<String> {
    let total = stocks + bonds + cash;
    if (total - 100.0).abs() > 0.01 {
        vec![format!(
            "Asset allocation percentages must sum to 100% (currently {})",
            format_percent(total)
        )]
    } else {
        Vec::new()
    }
}
