// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - backend and identity provider clients.

pub mod api;
pub mod auth;
pub mod health;
pub mod oidc;
pub mod resolver;

pub use api::{ApiClient, ApiSession, Service};
pub use auth::{AuthService, AuthState, LoginCallback};
pub use health::{HealthMonitor, HealthStatus, SweepReport};
pub use oidc::IdentityProvider;
