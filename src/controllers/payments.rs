// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payments section: active subscription, payment history and the
//! subscription mutations.
//!
//! Every mutation works on the subscription loaded by the last [`load`] and
//! re-fetches it afterwards.

use super::{load_section, recover};
use crate::error::{AppError, Result};
use crate::format::format_money;
use crate::models::{BillingFrequency, Payment, PaymentMethodUpdate, PaymentType, Subscription};
use crate::render::{escape, NoticeKind, Region, Section, FREQUENCY_FORM, PAYMENT_METHOD_FORM};
use crate::services::Service;
use crate::time_utils::{format_long_date, format_short_date};
use crate::validation::{FieldErrors, FormValues};
use crate::AppState;
use validator::Validate;

pub const NO_SUBSCRIPTION: &str = "No active subscription found";

const NO_SUBSCRIPTION_VIEW: &str = "<div class=\"empty-state\">\
<h3>No Active Subscription</h3>\
<p>You don't have an active advisory subscription yet.</p>\
<a class=\"btn btn-primary\" href=\"/section/dashboard\">Explore Advisory Plans</a></div>";

const NO_HISTORY_VIEW: &str = "<div class=\"empty-state\"><p>No payment history yet</p></div>";

pub async fn load(state: &AppState) -> Result<()> {
    let user_id = state.auth.user_id();
    let subscription_path = format!("/api/subscriptions/{}/active", user_id);
    let history_path = format!("/api/payments/history/{}", user_id);

    let api = state.api.session();
    let (subscription, history) = tokio::join!(
        api.get_json::<Subscription>(Service::Payment, &subscription_path),
        api.get_json::<Vec<Payment>>(Service::Payment, &history_path),
    );

    let subscription = match subscription {
        Err(e) if e.status() == Some(404) => Ok(None),
        other => other.map(Some),
    };
    let subscription = recover(subscription, "subscription")?;
    let history = recover(history, "payment history")?;

    let mut page = state.page.write().await;
    match subscription {
        Some(Some(subscription)) => {
            page.set_region(Region::SubscriptionCard, render_subscription(&subscription));
            page.set_subscription(Some(subscription));
        }
        Some(None) => {
            page.set_region(Region::SubscriptionCard, NO_SUBSCRIPTION_VIEW.to_string());
            page.set_subscription(None);
        }
        // Left empty for the heal pass to fill with the error panel.
        None => {
            page.clear_region(Region::SubscriptionCard);
            page.set_subscription(None);
        }
    }
    match history {
        Some(history) => page.set_region(Region::PaymentHistory, render_history(&history)),
        None => page.clear_region(Region::PaymentHistory),
    }
    Ok(())
}

pub fn render_subscription(subscription: &Subscription) -> String {
    let next_payment = subscription
        .next_payment_date
        .as_deref()
        .map(format_long_date)
        .unwrap_or_else(|| "N/A".to_string());
    let method = subscription
        .payment_method
        .as_ref()
        .map(|m| m.summary())
        .unwrap_or_else(|| "None on file".to_string());

    let detail = |label: &str, value: &str| {
        format!(
            "<div class=\"detail-item\"><span class=\"detail-label\">{}</span>\
             <span class=\"detail-value\">{}</span></div>",
            label, value
        )
    };

    format!(
        "<div class=\"subscription-header\"><h2>{} Advisory Tier</h2>\
         <span class=\"subscription-status status-{}\">{}</span></div>\
         <div class=\"subscription-details\">{}{}{}{}</div>\
         <div class=\"quick-actions\">\
         <a class=\"action-button\" href=\"/modals/payment-method\">Change Payment Method</a>\
         <a class=\"action-button\" href=\"/modals/frequency\">Update Frequency</a>\
         <a class=\"action-button\" href=\"/modals/cancel\">Pause/Cancel</a></div>",
        escape(&subscription.tier),
        escape(&subscription.status.to_lowercase()),
        escape(&subscription.status),
        detail("Billing Frequency", subscription.frequency.as_str()),
        detail("Amount", &format_money(subscription.amount)),
        detail("Next Payment", &escape(&next_payment)),
        detail("Payment Method", &escape(&method)),
    )
}

pub fn render_history(payments: &[Payment]) -> String {
    if payments.is_empty() {
        return NO_HISTORY_VIEW.to_string();
    }

    payments
        .iter()
        .map(|payment| {
            format!(
                "<div class=\"payment-item\"><div><div class=\"payment-date\">{}</div>\
                 <div class=\"payment-transaction\">{}</div></div>\
                 <div class=\"payment-amount\">{}</div>\
                 <span class=\"payment-status-badge status-{}\">{}</span></div>",
                escape(&payment.date().map(format_short_date).unwrap_or_default()),
                escape(payment.transaction_id.as_deref().unwrap_or("Processing...")),
                format_money(payment.amount),
                payment.status_class(),
                escape(&payment.status)
            )
        })
        .collect()
}

/// Build the payment-method payload from the submitted form.
pub fn parse_payment_method(values: &FormValues) -> std::result::Result<PaymentMethodUpdate, FieldErrors> {
    let field = |name: &str| values.get(name).map(|v| v.trim().to_string()).unwrap_or_default();
    let mut errors = FieldErrors::new();

    let payment_type = PaymentType::parse(&field("type"));
    if payment_type.is_none() {
        errors.insert("type".to_string(), vec!["Payment type is required".to_string()]);
    }
    let brand = field("brand");
    let update = PaymentMethodUpdate {
        payment_type: payment_type.unwrap_or(PaymentType::CreditCard),
        holder_name: field("holderName"),
        last4: field("last4"),
        brand: (!brand.is_empty()).then_some(brand),
    };

    if let Err(failures) = update.validate() {
        for (name, failures) in failures.field_errors() {
            let name = match name.as_ref() {
                "holder_name" => "holderName",
                other => other,
            };
            let messages = failures
                .iter()
                .map(|f| {
                    f.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", name))
                })
                .collect();
            errors.insert(name.to_string(), messages);
        }
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(errors)
    }
}

async fn current_subscription(state: &AppState) -> Option<Subscription> {
    let page = state.page.read().await;
    page.subscription().cloned()
}

/// Report the outcome of a mutation and refresh the subscription on success.
async fn finish(
    state: &AppState,
    result: Result<()>,
    success: &str,
    failure: &str,
    form: Option<&'static str>,
) -> Result<()> {
    if recover(result, "subscription update")?.is_none() {
        state.page.write().await.notify(NoticeKind::Error, failure);
        return Ok(());
    }

    {
        let mut page = state.page.write().await;
        if let Some(form) = form {
            page.clear_form(form);
        }
        page.close_modal();
        page.notify(NoticeKind::Success, success);
    }
    load_section(state, Section::Payments).await
}

async fn no_subscription(state: &AppState) -> Result<()> {
    state.page.write().await.notify(NoticeKind::Error, NO_SUBSCRIPTION);
    Ok(())
}

pub async fn update_payment_method(state: &AppState, values: FormValues) -> Result<()> {
    let Some(subscription) = current_subscription(state).await else {
        return no_subscription(state).await;
    };
    let update = match parse_payment_method(&values) {
        Ok(update) => update,
        Err(errors) => {
            state
                .page
                .write()
                .await
                .reject_form(PAYMENT_METHOD_FORM, values, errors);
            return Ok(());
        }
    };

    let path = format!("/api/subscriptions/{}/payment-method", subscription.id);
    let result = state.api.put(Service::Payment, &path, &update).await;
    finish(
        state,
        result,
        "Payment method updated successfully!",
        "Failed to update payment method. Please try again.",
        Some(PAYMENT_METHOD_FORM),
    )
    .await
}

pub async fn update_frequency(state: &AppState, values: FormValues) -> Result<()> {
    let Some(subscription) = current_subscription(state).await else {
        return no_subscription(state).await;
    };
    let frequency = values
        .get("frequency")
        .and_then(|v| BillingFrequency::parse(v))
        .ok_or_else(|| AppError::BadRequest("unknown billing frequency".to_string()))?;

    let path = format!("/api/subscriptions/{}", subscription.id);
    let result = state
        .api
        .put(Service::Payment, &path, &subscription.with_frequency(frequency))
        .await;
    finish(
        state,
        result,
        "Billing frequency updated successfully!",
        "Failed to update billing frequency. Please try again.",
        Some(FREQUENCY_FORM),
    )
    .await
}

pub async fn pause(state: &AppState) -> Result<()> {
    let Some(subscription) = current_subscription(state).await else {
        return no_subscription(state).await;
    };
    let path = format!("/api/subscriptions/{}/pause", subscription.id);
    let result = state.api.patch(Service::Payment, &path).await;
    finish(
        state,
        result,
        "Subscription paused successfully",
        "Failed to pause subscription. Please try again.",
        None,
    )
    .await
}

pub async fn cancel(state: &AppState) -> Result<()> {
    let Some(subscription) = current_subscription(state).await else {
        return no_subscription(state).await;
    };
    let path = format!("/api/subscriptions/{}", subscription.id);
    let result = state.api.delete(Service::Payment, &path).await;
    finish(
        state,
        result,
        "Subscription cancelled successfully",
        "Failed to cancel subscription. Please try again.",
        None,
    )
    .await
}
