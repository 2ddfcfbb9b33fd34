// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with degraded-but-functional responses.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Application error type shared by the services, controllers and routes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request was rejected or timed out before a response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// No connection could be opened, so the request was never sent.
    #[error("Connection failed: {0}")]
    Unreachable(String),

    /// Backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Returned OAuth state does not match the one persisted before redirect.
    #[error("Invalid state parameter - possible CSRF attack")]
    StateMismatch,

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("Failed to get user information from backend: {0}")]
    ProfileFetchFailed(String),

    #[error("No valid authentication token")]
    NoValidToken,

    #[error("Authentication required")]
    AuthRequired,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Errors that must force the UI back to the login view.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            AppError::StateMismatch
                | AppError::TokenExchangeFailed(_)
                | AppError::ProfileFetchFailed(_)
                | AppError::NoValidToken
                | AppError::AuthRequired
        )
    }

    /// Errors a view controller recovers from locally with fallback content.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Network(_)
                | AppError::Unreachable(_)
                | AppError::Http { .. }
                | AppError::Parse(_)
        )
    }

    /// HTTP status carried by the error, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            AppError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else if e.is_connect() {
            AppError::Unreachable(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::StateMismatch
            | AppError::TokenExchangeFailed(_)
            | AppError::ProfileFetchFailed(_) => {
                tracing::warn!(error = %self, "Login failed");
                (StatusCode::UNAUTHORIZED, "Login failed. Please try again.")
            }
            AppError::NoValidToken | AppError::AuthRequired => (
                StatusCode::UNAUTHORIZED,
                "Your session has expired. Please log in again.",
            ),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Page not found."),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Invalid request."),
            AppError::Network(_)
            | AppError::Unreachable(_)
            | AppError::Http { .. }
            | AppError::Parse(_) => {
                tracing::warn!(error = %self, "Backend unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    "Service temporarily unavailable. Please try again later.",
                )
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
            }
        };

        let body = format!(
            "<div class=\"error-message\">❌ {}</div>",
            crate::render::escape(message)
        );

        (status, Html(body)).into_response()
    }
}

/// Result type alias for services and handlers
pub type Result<T> = std::result::Result<T, AppError>;
