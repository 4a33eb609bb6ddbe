//! Geolocation lookup configuration.

use std::env;

/// Configuration for the optional IP geolocation enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct GeolocationConfig {
    pub enabled: bool,
    /// ip-api.com compatible endpoint; the IP is appended as a path segment
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://ip-api.com/json".to_string(),
            timeout_seconds: 3,
        }
    }
}

impl GeolocationConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let enabled = env::var("GEOLOCATION_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(defaults.enabled);

        let base_url = env::var("GEOLOCATION_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_seconds = env::var("GEOLOCATION_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|t: &u64| *t > 0)
            .unwrap_or(defaults.timeout_seconds);

        Self {
            enabled,
            base_url,
            timeout_seconds,
        }
    }

    /// A configuration with lookups switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    #[test]
    fn test_geolocation_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::set_var("GEOLOCATION_ENABLED", "false");
            env::set_var("GEOLOCATION_BASE_URL", "http://127.0.0.1:9999/json");
            env::set_var("GEOLOCATION_TIMEOUT_SECONDS", "0");
        }

        let config = GeolocationConfig::from_env();
        assert!(!config.enabled);
        assert_eq!(config.base_url, "http://127.0.0.1:9999/json");
        assert_eq!(config.timeout_seconds, 3);

        unsafe {
            env::remove_var("GEOLOCATION_ENABLED");
            env::remove_var("GEOLOCATION_BASE_URL");
            env::remove_var("GEOLOCATION_TIMEOUT_SECONDS");
        }

        assert_eq!(GeolocationConfig::from_env(), GeolocationConfig::default());
    }
}
