//! Remote backend configuration
//!
//! Absence of configuration is routing information for the unified store,
//! never an error: a missing or malformed endpoint simply means every
//! operation runs against the on-device store.

use url::Url;

/// Environment variable naming the backend base URL.
pub const BACKEND_URL_VAR: &str = "SCOUT_BACKEND_URL";

/// Environment variable naming the backend API key.
pub const BACKEND_KEY_VAR: &str = "SCOUT_BACKEND_KEY";

/// Connection parameters for the hosted backend.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: Url,
    pub api_key: String,
}

impl RemoteConfig {
    /// Build a config from explicit values; `None` if the URL does not
    /// parse as http(s).
    pub fn new(base_url: &str, api_key: &str) -> Option<Self> {
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = Url::parse(base_url).ok()?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return None;
        }
        Some(Self {
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Read `SCOUT_BACKEND_URL` / `SCOUT_BACKEND_KEY` from the
    /// environment. `None` when either is unset or invalid.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(BACKEND_URL_VAR).ok()?;
        let key = std::env::var(BACKEND_KEY_VAR).ok()?;
        Self::new(&url, &key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = RemoteConfig::new("https://db.example.com", "anon-key").unwrap();
        assert_eq!(config.base_url.scheme(), "https");
    }

    #[test]
    fn test_rejects_bad_url_or_empty_key() {
        assert!(RemoteConfig::new("not a url", "key").is_none());
        assert!(RemoteConfig::new("ftp://db.example.com", "key").is_none());
        assert!(RemoteConfig::new("https://db.example.com", "  ").is_none());
    }
}
