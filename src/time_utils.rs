// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps and date display.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Current time as Unix epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse the date formats the backend emits: RFC3339, naive datetime, or a plain date.
pub fn parse_backend_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// "October 16, 2026"; unparseable input is shown as-is.
pub fn format_long_date(raw: &str) -> String {
    parse_backend_date(raw)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// "Oct 16, 2026"; unparseable input is shown as-is.
pub fn format_short_date(raw: &str) -> String {
    parse_backend_date(raw)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}
