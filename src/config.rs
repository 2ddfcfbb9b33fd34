//! Application configuration loaded from environment variables.
//!
//! Every value has a default matching the local docker-compose deployment
//! (gateway on 8080, services on 8081-8085, identity provider on 9080).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Identity provider ---
    /// OIDC issuer base, e.g. `{keycloak}/realms/finova/protocol/openid-connect`
    pub issuer_url: String,
    /// OAuth client ID (public client, no secret)
    pub client_id: String,
    /// Where the identity provider sends the browser back to
    pub redirect_uri: String,
    /// Space-separated scopes to request
    pub scope: String,

    // --- Backend services ---
    pub gateway_url: String,
    pub user_service_url: String,
    pub account_service_url: String,
    pub planning_service_url: String,
    pub payment_service_url: String,
    pub analytics_service_url: String,

    // --- Shell ---
    /// Port the dashboard shell listens on
    pub port: u16,
    /// File backing the persistent session keys; memory-only when unset
    pub storage_path: Option<PathBuf>,
    /// User id used when no authenticated profile is available
    pub demo_user_id: u64,

    // --- Timing ---
    pub request_timeout: Duration,
    pub health_probe_timeout: Duration,
    pub health_poll_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let keycloak_url =
            env::var("KEYCLOAK_URL").unwrap_or_else(|_| "http://localhost:9080".to_string());
        let realm = env::var("KEYCLOAK_REALM").unwrap_or_else(|_| "finova".to_string());
        let port = parse_var("PORT", 3000u16)?;

        Ok(Self {
            issuer_url: env::var("OIDC_ISSUER_URL").unwrap_or_else(|_| {
                format!(
                    "{}/realms/{}/protocol/openid-connect",
                    keycloak_url.trim_end_matches('/'),
                    realm
                )
            }),
            client_id: env::var("OIDC_CLIENT_ID")
                .unwrap_or_else(|_| "finova-frontend".to_string()),
            redirect_uri: env::var("OIDC_REDIRECT_URI")
                .unwrap_or_else(|_| format!("http://localhost:{}/callback", port)),
            scope: env::var("OIDC_SCOPE").unwrap_or_else(|_| "openid profile email roles".to_string()),

            gateway_url: service_url("API_GATEWAY_URL", 8080),
            user_service_url: service_url("USER_SERVICE_URL", 8081),
            account_service_url: service_url("ACCOUNT_SERVICE_URL", 8082),
            planning_service_url: service_url("PLANNING_SERVICE_URL", 8083),
            payment_service_url: service_url("PAYMENT_SERVICE_URL", 8084),
            analytics_service_url: service_url("ANALYTICS_SERVICE_URL", 8085),

            port,
            storage_path: env::var("SESSION_STORE_PATH").ok().map(PathBuf::from),
            demo_user_id: parse_var("DEMO_USER_ID", 1u64)?,

            request_timeout: Duration::from_millis(parse_var("REQUEST_TIMEOUT_MS", 10_000u64)?),
            health_probe_timeout: Duration::from_millis(parse_var(
                "HEALTH_PROBE_TIMEOUT_MS",
                3_000u64,
            )?),
            health_poll_interval: Duration::from_secs(parse_var("HEALTH_POLL_INTERVAL_SECS", 30u64)?),
        })
    }

    /// Config pointing every backend at one base URL, for tests.
    pub fn test_default() -> Self {
        Self::with_backend("http://127.0.0.1:9")
    }

    /// Config with the identity provider and all services served from `base`.
    ///
    /// Used by tests that stand a single mock server in for the whole backend.
    pub fn with_backend(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            issuer_url: format!("{}/realms/finova/protocol/openid-connect", base),
            client_id: "finova-frontend".to_string(),
            redirect_uri: "http://localhost:3000/callback".to_string(),
            scope: "openid profile email roles".to_string(),
            gateway_url: base.clone(),
            user_service_url: base.clone(),
            account_service_url: base.clone(),
            planning_service_url: base.clone(),
            payment_service_url: base.clone(),
            analytics_service_url: base,
            port: 3000,
            storage_path: None,
            demo_user_id: 1,
            request_timeout: Duration::from_secs(2),
            health_probe_timeout: Duration::from_millis(500),
            health_poll_interval: Duration::from_secs(30),
        }
    }
}

fn service_url(var: &str, default_port: u16) -> String {
    env::var(var)
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| format!("http://localhost:{}", default_port))
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(var)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
