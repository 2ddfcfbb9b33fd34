// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Advisory subscription and payment history.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingFrequency {
    Monthly,
    Quarterly,
    Annual,
}

impl BillingFrequency {
    pub const ALL: [BillingFrequency; 3] = [Self::Monthly, Self::Quarterly, Self::Annual];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::Quarterly => "QUARTERLY",
            Self::Annual => "ANNUAL",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == raw.trim())
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly billing",
            Self::Quarterly => "Quarterly billing (5% discount)",
            Self::Annual => "Annual billing (15% discount)",
        }
    }
}

impl fmt::Display for BillingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    CreditCard,
    DebitCard,
    BankAccount,
}

impl PaymentType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "CREDIT_CARD" => Some(Self::CreditCard),
            "DEBIT_CARD" => Some(Self::DebitCard),
            "BANK_ACCOUNT" => Some(Self::BankAccount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

impl PaymentMethod {
    /// `Visa ****4242`, or `Card ****` when nothing is on file.
    pub fn summary(&self) -> String {
        format!(
            "{} ****{}",
            self.brand.as_deref().filter(|b| !b.is_empty()).unwrap_or("Card"),
            self.last4.as_deref().unwrap_or_default()
        )
    }
}

/// Active subscription as returned by the payment service.
///
/// Fields this client does not read are kept in `extra` so that the
/// frequency update can send the subscription back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub status: String,
    pub frequency: BillingFrequency,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub next_payment_date: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Subscription {
    /// Copy of this subscription with a new billing frequency.
    pub fn with_frequency(&self, frequency: BillingFrequency) -> Self {
        Self {
            frequency,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Payment {
    /// Badge class: completed, pending, or failed for anything else.
    pub fn status_class(&self) -> &'static str {
        match self.status.as_str() {
            "COMPLETED" => "completed",
            "PENDING" => "pending",
            _ => "failed",
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.processed_at.as_deref().or(self.created_at.as_deref())
    }
}

/// Body of `PUT /api/subscriptions/{id}/payment-method`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodUpdate {
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    #[validate(length(min = 1, max = 100, message = "Cardholder name is required"))]
    pub holder_name: String,
    #[validate(
        length(equal = 4, message = "Enter the last 4 digits"),
        custom(function = "all_digits")
    )]
    pub last4: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

fn all_digits(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("digits").with_message(Cow::Borrowed("Last 4 must be digits only")))
    }
}
