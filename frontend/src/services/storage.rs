//! Persisted login credential.
//!
//! The token lives in `localStorage` as a raw string so it survives reloads.
//! Views never read storage directly: they get an [`AuthToken`] from here
//! and hand it to the API client.

use std::fmt;

use gloo::storage::{LocalStorage, Storage};

use crate::services::config::AppConfig;
use crate::services::logging::Logger;

/// Bearer credential for the Iqra API
#[derive(Clone, PartialEq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CredentialStore {
    key: String,
}

impl CredentialStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            key: config.token_key.clone(),
        }
    }

    pub fn load(&self) -> Option<AuthToken> {
        LocalStorage::raw()
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
            .map(AuthToken)
    }

    pub fn has_token(&self) -> bool {
        self.load().is_some()
    }

    pub fn save(&self, token: &str) {
        if LocalStorage::raw().set_item(&self.key, token).is_err() {
            Logger::error_with_component("credential-store", "Failed to persist token");
        }
    }

    pub fn clear(&self) {
        if LocalStorage::raw().remove_item(&self.key).is_err() {
            Logger::error_with_component("credential-store", "Failed to clear token");
        }
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(&AppConfig::from_env())
    }
}
