// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed client for the backend services.
//!
//! Each call is routed through the gateway first and the owning service
//! directly second. Requests carry the bearer token whenever one is held.
//! Writes only reach the direct URL when the gateway could not be connected.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::auth::AuthService;
use crate::services::resolver::{candidate_urls, first_reachable, first_success};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Logical backend service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    User,
    Account,
    Planning,
    Payment,
    Analytics,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Service::User,
        Service::Account,
        Service::Planning,
        Service::Payment,
        Service::Analytics,
    ];

    /// Path segment used by the gateway's health routes.
    pub fn name(self) -> &'static str {
        match self {
            Service::User => "users",
            Service::Account => "accounts",
            Service::Planning => "planning",
            Service::Payment => "payments",
            Service::Analytics => "analytics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Service::User => "User Service",
            Service::Account => "Account Service",
            Service::Planning => "Planning Service",
            Service::Payment => "Payment Service",
            Service::Analytics => "Analytics Service",
        }
    }

    /// Direct base URL of the service.
    pub fn base_url(self, config: &Config) -> &str {
        match self {
            Service::User => &config.user_service_url,
            Service::Account => &config.account_service_url,
            Service::Planning => &config.planning_service_url,
            Service::Payment => &config.payment_service_url,
            Service::Analytics => &config.analytics_service_url,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
    auth: Arc<AuthService>,
}

impl ApiClient {
    pub fn new(config: &Config, http: reqwest::Client, auth: Arc<AuthService>) -> Self {
        Self {
            http,
            config: config.clone(),
            auth,
        }
    }

    /// Gateway URL then direct URL for `path` on `service`.
    pub fn candidates(&self, service: Service, path: &str) -> Vec<String> {
        candidate_urls(
            &[&self.config.gateway_url, service.base_url(&self.config)],
            path,
        )
    }

    /// Fix whether the requests that follow carry a bearer token.
    ///
    /// Loads that fan out with `tokio::join!` take one session up front, so
    /// a 401 on one branch turns its siblings into `NoValidToken` failures
    /// instead of unauthenticated retries.
    pub fn session(&self) -> ApiSession<'_> {
        ApiSession {
            client: self,
            authenticated: self.auth.bearer_token().is_some(),
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, service: Service, path: &str) -> Result<T> {
        self.session().get_json(service, path).await
    }

    pub async fn post<B: Serialize>(&self, service: Service, path: &str, body: &B) -> Result<()> {
        self.session().post(service, path, body).await
    }

    pub async fn put<B: Serialize>(&self, service: Service, path: &str, body: &B) -> Result<()> {
        self.session().put(service, path, body).await
    }

    pub async fn patch(&self, service: Service, path: &str) -> Result<()> {
        self.session().patch(service, path).await
    }

    pub async fn delete(&self, service: Service, path: &str) -> Result<()> {
        self.session().delete(service, path).await
    }
}

/// Requests sharing one authentication decision.
#[derive(Clone, Copy)]
pub struct ApiSession<'a> {
    client: &'a ApiClient,
    authenticated: bool,
}

impl ApiSession<'_> {
    pub async fn get_json<T: DeserializeOwned>(&self, service: Service, path: &str) -> Result<T> {
        let candidates = self.client.candidates(service, path);
        let (endpoint, value) = first_success(&candidates, |url| async move {
            let response = self.execute(Method::GET, &url, None).await?;
            response
                .json::<T>()
                .await
                .map_err(|e| AppError::Parse(e.to_string()))
        })
        .await?;

        tracing::debug!(service = %service, endpoint = %endpoint, "Fetched");
        Ok(value)
    }

    pub async fn post<B: Serialize>(&self, service: Service, path: &str, body: &B) -> Result<()> {
        self.mutate(Method::POST, service, path, Some(to_value(body)?))
            .await
    }

    pub async fn put<B: Serialize>(&self, service: Service, path: &str, body: &B) -> Result<()> {
        self.mutate(Method::PUT, service, path, Some(to_value(body)?))
            .await
    }

    pub async fn patch(&self, service: Service, path: &str) -> Result<()> {
        self.mutate(Method::PATCH, service, path, None).await
    }

    pub async fn delete(&self, service: Service, path: &str) -> Result<()> {
        self.mutate(Method::DELETE, service, path, None).await
    }

    /// Writes move on to the next candidate only when nothing reached the
    /// previous one, so a slow or failing backend never sees a replay.
    async fn mutate(
        &self,
        method: Method,
        service: Service,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        let candidates = self.client.candidates(service, path);
        let (endpoint, ()) = first_reachable(&candidates, |url| {
            let method = method.clone();
            let body = body.as_ref();
            async move {
                self.execute(method, &url, body).await?;
                Ok(())
            }
        })
        .await?;

        tracing::info!(service = %service, method = %method, endpoint = %endpoint, "Backend updated");
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let response = if self.authenticated {
            self.client
                .auth
                .authenticated_request(method, url, body)
                .await?
        } else {
            let mut request = self.client.http.request(method, url);
            if let Some(body) = body {
                request = request.json(body);
            }
            request.send().await?
        };

        check_response(response).await
    }
}

fn to_value<B: Serialize>(body: &B) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| AppError::Internal(e.into()))
}

/// Turn a non-success response into `AppError::Http`.
pub async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::Http {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    })
}
