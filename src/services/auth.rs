// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session and authentication state.
//!
//! Owns the authorization-code login, the persisted token and profile, expiry
//! checks, and the bearer-token request wrapper. A session is valid while a
//! profile is cached in memory and the stored expiry is in the future.
//!
//! ```text
//! Unauthenticated -> ExchangingToken -> Authenticated
//!        ^                  |                 |
//!        +---- failure -----+---- 401/logout -+
//! ```

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{AuthMeResponse, TokenResponse, UserProfile, ValidateResponse};
use crate::services::oidc::IdentityProvider;
use crate::storage::{keys, KeyValueStore};
use crate::time_utils::now_millis;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    ExchangingToken,
    Authenticated,
}

/// Query parameters the identity provider appends to the redirect URI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Default)]
struct Session {
    user: Option<UserProfile>,
    state: AuthState,
}

pub struct AuthService {
    http: reqwest::Client,
    provider: IdentityProvider,
    /// Survives restarts: tokens, expiry, profile.
    persistent: Arc<dyn KeyValueStore>,
    /// Lives for one login redirect: the OAuth state.
    transient: Arc<dyn KeyValueStore>,
    user_service_url: String,
    demo_user_id: u64,
    session: RwLock<Session>,
}

impl AuthService {
    pub fn new(
        config: &Config,
        http: reqwest::Client,
        persistent: Arc<dyn KeyValueStore>,
        transient: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            provider: IdentityProvider::new(config, http.clone()),
            http,
            persistent,
            transient,
            user_service_url: config.user_service_url.trim_end_matches('/').to_string(),
            demo_user_id: config.demo_user_id,
            session: RwLock::new(Session::default()),
        }
    }

    /// Restore or establish a session at startup.
    ///
    /// A stored unexpired token is validated with the backend first. Failing
    /// that, an authorization code in `callback` completes a login. Problems
    /// with a stored token only ever degrade to `Unauthenticated`; a failed
    /// callback is returned so the caller can show it.
    pub async fn initialize(&self, callback: Option<&LoginCallback>) -> Result<AuthState> {
        if let Some(token) = self.bearer_token() {
            if self.validate_token(&token).await {
                match self.fetch_profile(&token).await {
                    Ok(user) => {
                        self.set_user(user)?;
                        tracing::info!("Restored stored session");
                        return Ok(AuthState::Authenticated);
                    }
                    Err(e) => tracing::info!(error = %e, "Stored session could not be restored"),
                }
            }
        }

        if let Some(callback) = callback {
            if let Some(code) = callback.code.as_deref() {
                self.complete_login(code, callback.state.as_deref()).await?;
                return Ok(AuthState::Authenticated);
            }
        }

        self.reset();
        Ok(AuthState::Unauthenticated)
    }

    /// Persist a new state token and return the authorization URL.
    pub fn start_login(&self) -> Result<String> {
        let state = IdentityProvider::generate_state()?;
        self.transient.set(keys::OAUTH_STATE, &state)?;
        tracing::info!("Redirecting to identity provider");
        Ok(self.provider.authorization_url(&state))
    }

    /// Finish the authorization-code flow.
    ///
    /// The state check happens before any network traffic.
    pub async fn complete_login(&self, code: &str, state: Option<&str>) -> Result<UserProfile> {
        let stored = self.transient.get(keys::OAUTH_STATE);
        match (state, stored.as_deref()) {
            (Some(returned), Some(expected)) if returned == expected => {}
            _ => {
                tracing::warn!(has_state = state.is_some(), "OAuth state verification failed");
                self.reset();
                return Err(AppError::StateMismatch);
            }
        }
        self.transient.remove(keys::OAUTH_STATE)?;
        self.set_state(AuthState::ExchangingToken);

        match self.exchange_and_load(code).await {
            Ok(user) => {
                tracing::info!(username = %user.username, "Login complete");
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.end_session();
                Err(e)
            }
        }
    }

    async fn exchange_and_load(&self, code: &str) -> Result<UserProfile> {
        let tokens = self.provider.exchange_code(code).await?;
        self.store_tokens(&tokens)?;

        let user = self.fetch_profile(&tokens.access_token).await?;
        self.set_user(user.clone())?;
        Ok(user)
    }

    fn store_tokens(&self, tokens: &TokenResponse) -> Result<()> {
        let expiry = tokens
            .expires_in
            .checked_mul(1000)
            .and_then(|ms| now_millis().checked_add(ms))
            .ok_or_else(|| {
                AppError::TokenExchangeFailed(format!("invalid expires_in {}", tokens.expires_in))
            })?;

        self.persistent.set(keys::ACCESS_TOKEN, &tokens.access_token)?;
        if let Some(refresh) = &tokens.refresh_token {
            self.persistent.set(keys::REFRESH_TOKEN, refresh)?;
        }
        self.persistent.set(keys::TOKEN_EXPIRY, &expiry.to_string())
    }

    async fn fetch_profile(&self, token: &str) -> Result<UserProfile> {
        let response = self
            .http
            .get(format!("{}/api/auth/me", self.user_service_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::ProfileFetchFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Profile request rejected token");
            self.clear_storage();
            return Err(AppError::ProfileFetchFailed("token rejected".to_string()));
        }
        if !status.is_success() {
            return Err(AppError::ProfileFetchFailed(format!("HTTP {}", status)));
        }

        let body: AuthMeResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProfileFetchFailed(e.to_string()))?;
        body.user
            .ok_or_else(|| AppError::ProfileFetchFailed("response carried no user".to_string()))
    }

    async fn validate_token(&self, token: &str) -> bool {
        let result = self
            .http
            .get(format!("{}/api/auth/validate", self.user_service_url))
            .bearer_auth(token)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => response
                .json::<ValidateResponse>()
                .await
                .map(|v| v.valid)
                .unwrap_or(false),
            Ok(response) => {
                tracing::debug!(status = %response.status(), "Token validation refused");
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "Token validation unavailable");
                false
            }
        }
    }

    /// A cached profile exists and the stored expiry has not passed.
    pub fn is_session_valid(&self) -> bool {
        self.read_session().user.is_some() && !self.token_expired()
    }

    fn token_expired(&self) -> bool {
        self.persistent
            .get(keys::TOKEN_EXPIRY)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map_or(true, |expiry| now_millis() >= expiry)
    }

    /// The stored access token, if it has not expired.
    pub fn bearer_token(&self) -> Option<String> {
        if self.token_expired() {
            return None;
        }
        self.persistent
            .get(keys::ACCESS_TOKEN)
            .filter(|token| !token.is_empty())
    }

    /// Send a request carrying the bearer token.
    ///
    /// A 401 ends the session: every stored key is cleared and the caller
    /// gets `AuthRequired`.
    pub async fn authenticated_request(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let token = self.bearer_token().ok_or(AppError::NoValidToken)?;

        let mut request = self.http.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(url = %url, "Backend rejected token, ending session");
            self.end_session();
            return Err(AppError::AuthRequired);
        }
        Ok(response)
    }

    /// Clear the session and tell the identity provider in the background.
    pub fn logout(&self) {
        let token = self.persistent.get(keys::ACCESS_TOKEN);
        self.end_session();

        if let Some(token) = token {
            let provider = self.provider.clone();
            tokio::spawn(async move {
                if let Err(e) = provider.logout(&token).await {
                    tracing::debug!(error = %e, "SSO logout failed, ignoring");
                }
            });
        }
        tracing::info!("Logged out");
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.read_session().user.clone()
    }

    pub fn auth_state(&self) -> AuthState {
        self.read_session().state
    }

    /// Id for backend paths: the profile's id, else the demo id.
    pub fn user_id(&self) -> String {
        self.read_session()
            .user
            .as_ref()
            .and_then(UserProfile::resolved_id)
            .unwrap_or_else(|| self.demo_user_id.to_string())
    }

    fn set_user(&self, user: UserProfile) -> Result<()> {
        let raw = serde_json::to_string(&user).map_err(|e| AppError::Storage(e.to_string()))?;
        self.persistent.set(keys::USER_INFO, &raw)?;

        let mut session = self.write_session();
        session.user = Some(user);
        session.state = AuthState::Authenticated;
        Ok(())
    }

    fn set_state(&self, state: AuthState) {
        self.write_session().state = state;
    }

    fn reset(&self) {
        let mut session = self.write_session();
        session.user = None;
        session.state = AuthState::Unauthenticated;
    }

    fn clear_storage(&self) {
        if let Err(e) = self.persistent.remove_all(&keys::SESSION) {
            tracing::error!(error = %e, "Failed to clear session storage");
        }
    }

    fn end_session(&self) {
        self.clear_storage();
        self.reset();
    }

    fn read_session(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_session(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> (AuthService, Arc<MemoryStore>) {
        let persistent = Arc::new(MemoryStore::new());
        let auth = AuthService::new(
            &Config::test_default(),
            reqwest::Client::new(),
            persistent.clone(),
            Arc::new(MemoryStore::new()),
        );
        (auth, persistent)
    }

    #[test]
    fn expired_token_is_not_offered() {
        let (auth, store) = service();
        store.set(keys::ACCESS_TOKEN, "tok").unwrap();
        store
            .set(keys::TOKEN_EXPIRY, &(now_millis() - 1).to_string())
            .unwrap();
        assert!(auth.bearer_token().is_none());

        store
            .set(keys::TOKEN_EXPIRY, &(now_millis() + 60_000).to_string())
            .unwrap();
        assert_eq!(auth.bearer_token().as_deref(), Some("tok"));
    }

    #[test]
    fn corrupt_expiry_counts_as_expired() {
        let (auth, store) = service();
        store.set(keys::ACCESS_TOKEN, "tok").unwrap();
        store.set(keys::TOKEN_EXPIRY, "tomorrow").unwrap();
        assert!(auth.bearer_token().is_none());
        assert!(!auth.is_session_valid());
    }

    #[test]
    fn overflowing_lifetime_stores_nothing() {
        let (auth, store) = service();
        let tokens = TokenResponse {
            access_token: "tok".into(),
            refresh_token: None,
            expires_in: i64::MAX,
        };

        let err = auth.store_tokens(&tokens).unwrap_err();
        assert!(matches!(err, AppError::TokenExchangeFailed(_)));
        assert!(store.get(keys::ACCESS_TOKEN).is_none());
        assert!(store.get(keys::TOKEN_EXPIRY).is_none());
    }

    #[test]
    fn user_id_falls_back_to_demo() {
        let (auth, _) = service();
        assert_eq!(auth.user_id(), "1");

        auth.set_user(UserProfile {
            user_id: Some("42".into()),
            username: "jane".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(auth.user_id(), "42");
        assert_eq!(auth.auth_state(), AuthState::Authenticated);
    }

    #[test]
    fn start_login_persists_state() {
        let persistent = Arc::new(MemoryStore::new());
        let transient = Arc::new(MemoryStore::new());
        let auth = AuthService::new(
            &Config::test_default(),
            reqwest::Client::new(),
            persistent,
            transient.clone(),
        );

        let url = auth.start_login().unwrap();
        let state = transient.get(keys::OAUTH_STATE).unwrap();
        assert!(url.ends_with(&format!("state={}", state)));
    }

    #[tokio::test]
    async fn missing_state_is_rejected() {
        let (auth, _) = service();
        let err = auth.complete_login("code", None).await.unwrap_err();
        assert!(matches!(err, AppError::StateMismatch));
        assert_eq!(auth.auth_state(), AuthState::Unauthenticated);
    }
}
