// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Owned render tree for the dashboard shell.
//!
//! [`Page`] fully determines the HTML served to the browser. Controllers and
//! route handlers mutate it; [`Page::to_html`] renders it.

mod document;
pub mod page;

pub use document::{
    ACCOUNT_FORM, CONTRIBUTION_FORM, FREQUENCY_FORM, PAYMENT_METHOD_FORM, RETIREMENT_CALCULATOR_FORM,
    SOCIAL_SECURITY_FORM,
};
pub use page::{FormState, Modal, Notice, NoticeKind, Page, Region, Section, TabGroup};

/// Escape text for HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
