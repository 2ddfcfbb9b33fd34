// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side key/value storage for session state.
//!
//! Two stores back the auth module: a persistent one that survives restarts
//! (tokens, expiry, cached profile) and a transient one that lives for the
//! duration of a login redirect (the OAuth state).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Names of the persisted session keys.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "finova_access_token";
    pub const REFRESH_TOKEN: &str = "finova_refresh_token";
    pub const USER_INFO: &str = "finova_user_info";
    pub const TOKEN_EXPIRY: &str = "finova_token_expiry";

    /// Every key that makes up a session, cleared together.
    pub const SESSION: [&str; 4] = [ACCESS_TOKEN, REFRESH_TOKEN, USER_INFO, TOKEN_EXPIRY];

    /// Anti-CSRF state kept across the authorization redirect.
    pub const OAUTH_STATE: &str = "oauth_state";
}

/// String key/value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove several keys. Every key is attempted; the first failure is
    /// reported.
    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let mut first_error = None;
        for key in keys {
            if let Err(e) = self.remove(key) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
