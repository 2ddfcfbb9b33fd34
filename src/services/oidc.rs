// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client for the OAuth2 authorization-code flow.
//!
//! The dashboard is a public client: no secret, no PKCE, and tokens are
//! treated as opaque. Signature checks are left to the backend services.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::TokenResponse;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};

/// Random bytes behind each state token (32 base64 characters).
const STATE_BYTES: usize = 24;

#[derive(Clone)]
pub struct IdentityProvider {
    http: reqwest::Client,
    issuer_url: String,
    client_id: String,
    redirect_uri: String,
    scope: String,
}

impl IdentityProvider {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            issuer_url: config.issuer_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
        }
    }

    /// Fresh URL-safe anti-CSRF state token.
    pub fn generate_state() -> Result<String> {
        let mut bytes = [0u8; STATE_BYTES];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("system random source unavailable")))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Authorization endpoint URL the browser is redirected to.
    pub fn authorization_url(&self, state: &str) -> String {
        format!(
            "{}/auth?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.issuer_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scope),
            urlencoding::encode(state)
        )
    }

    /// Exchange a one-time authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let response = self
            .http
            .post(format!("{}/token", self.issuer_url))
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.client_id.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::TokenExchangeFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Token endpoint rejected code");
            return Err(AppError::TokenExchangeFailed(format!("HTTP {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::TokenExchangeFailed(format!("invalid token response: {}", e)))
    }

    /// End the identity provider's SSO session for `access_token`.
    pub async fn logout(&self, access_token: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/logout", self.issuer_url))
            .bearer_auth(access_token)
            .form(&[("client_id", self.client_id.as_str())])
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Http {
                status: response.status().as_u16(),
                message: "logout rejected".to_string(),
            })
        }
    }
}
