//! Backend configuration for sync-enabled builds.
//!
//! Safe-to-ship public endpoint and key used to reach the hosted backend.
//! Secret credentials never live here; the backend enforces per-row access.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Environment variable naming the backend base URL
pub const ENV_BACKEND_URL: &str = "GEARLOG_BACKEND_URL";
/// Environment variable naming the backend API key
pub const ENV_API_KEY: &str = "GEARLOG_API_KEY";

/// Connection settings for the hosted backend
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://abc123.supabase.co`
    pub base_url: String,
    /// Public API key sent with every request
    pub api_key: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl BackendConfig {
    /// Build and validate a config from raw values
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let base_url = normalize_text_option(Some(base_url.into()))
            .ok_or_else(|| Error::Config("Backend URL must not be empty".to_string()))?;
        if !is_http_url(&base_url) {
            return Err(Error::Config(
                "Backend URL must include http:// or https://".to_string(),
            ));
        }
        let api_key = normalize_text_option(Some(api_key.into()))
            .ok_or_else(|| Error::Config("API key must not be empty".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Read configuration from the environment.
    ///
    /// Returns `Ok(None)` when neither variable is set (local-only mode) and
    /// an error when only one of the pair is present.
    pub fn from_env() -> Result<Option<Self>> {
        let base_url = normalize_text_option(std::env::var(ENV_BACKEND_URL).ok());
        let api_key = normalize_text_option(std::env::var(ENV_API_KEY).ok());

        match (base_url, api_key) {
            (Some(base_url), Some(api_key)) => Self::new(base_url, api_key).map(Some),
            (None, None) => Ok(None),
            (Some(_), None) => Err(Error::Config(format!("{ENV_API_KEY} is not set"))),
            (None, Some(_)) => Err(Error::Config(format!("{ENV_BACKEND_URL} is not set"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_validates_url_scheme() {
        assert!(BackendConfig::new("abc123.supabase.co", "key").is_err());
        assert!(BackendConfig::new("", "key").is_err());
        assert!(BackendConfig::new("https://abc123.supabase.co", "  ").is_err());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = BackendConfig::new("https://abc123.supabase.co/ ", "key").unwrap();
        assert_eq!(config.base_url, "https://abc123.supabase.co");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = BackendConfig::new("https://abc123.supabase.co", "anon-key").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("anon-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
