// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ordered candidate-list resolution.
//!
//! Every logical backend request has a list of URLs to try: the gateway
//! first, then the service directly. The first success wins. Auth failures
//! stop the walk since another route to the same backend would fail the
//! same way.

use crate::error::{AppError, Result};
use std::future::Future;

/// Join each base with `path`, dropping duplicates while keeping order.
pub fn candidate_urls(bases: &[&str], path: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::with_capacity(bases.len());
    for base in bases {
        let url = format!("{}{}", base.trim_end_matches('/'), path);
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

/// Try `attempt` against each candidate in order.
///
/// Returns the responding URL with its value, or the last failure.
pub async fn first_success<T, F, Fut>(candidates: &[String], mut attempt: F) -> Result<(String, T)>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for url in candidates {
        match attempt(url.clone()).await {
            Ok(value) => return Ok((url.clone(), value)),
            Err(e) if e.is_auth_error() => return Err(e),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Candidate failed");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::Network("no candidate URLs".to_string())))
}

/// Like [`first_success`], but only an unreachable candidate hands over to
/// the next one. Any other failure means the request may have been applied.
pub async fn first_reachable<T, F, Fut>(candidates: &[String], mut attempt: F) -> Result<(String, T)>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for url in candidates {
        match attempt(url.clone()).await {
            Ok(value) => return Ok((url.clone(), value)),
            Err(AppError::Unreachable(msg)) => {
                tracing::debug!(url = %url, error = %msg, "Candidate unreachable");
                last_error = Some(AppError::Unreachable(msg));
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::Network("no candidate URLs".to_string())))
}
