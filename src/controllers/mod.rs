// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View controllers.
//!
//! A controller fetches the data for one section and renders it into the
//! page's regions. Network, HTTP and parse failures render fixed fallback
//! content in the same region. Auth failures are returned so the caller can
//! put the login view back.

pub mod accounts;
pub mod analytics;
pub mod calculators;
pub mod dashboard;
pub mod fallback;
pub mod payments;
pub mod planning;

use crate::error::Result;
use crate::render::{Page, Section};
use crate::AppState;

/// Keep a successful value, swallow recoverable failures, pass auth errors on.
pub(crate) fn recover<T>(result: Result<T>, what: &'static str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            tracing::warn!(error = %e, what, "Fetch failed, rendering fallback");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Load `section` and fill whatever it left empty.
pub async fn load_section(state: &AppState, section: Section) -> Result<()> {
    match section {
        Section::Dashboard => dashboard::load(state).await?,
        Section::Accounts => accounts::load(state).await?,
        Section::Planning => planning::load(state).await?,
        Section::Payments => payments::load(state).await?,
        Section::Analytics => {
            let period = state.page.read().await.period();
            analytics::load(state, period).await?
        }
        Section::Services => {
            crate::services::health::refresh(state).await;
        }
    }

    heal(&mut *state.page.write().await, section);
    Ok(())
}

/// Re-apply fallbacks to empty regions of `section`. Returns how many were filled.
pub fn heal(page: &mut Page, section: Section) -> usize {
    let mut healed = 0;
    for region in page.empty_regions(section) {
        if let Some(html) = fallback::region(region) {
            page.set_region(region, html);
            healed += 1;
        }
    }
    if healed > 0 {
        tracing::debug!(section = section.name(), healed, "Filled empty regions");
    }
    healed
}
