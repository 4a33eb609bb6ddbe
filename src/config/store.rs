//! Log store backend configuration.
//!
//! The backend is picked once at startup: a remote table store when both an
//! endpoint and an access key are configured, the local log file otherwise.

use std::{env, path::PathBuf};

/// Default location of the file-backed visitor log
pub const DEFAULT_LOG_PATH: &str = "visitors_log.txt";

/// Connection settings for the hosted table store
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteStoreConfig {
    /// Base URL of the project, e.g. `https://xyz.supabase.co`
    pub endpoint: String,
    pub api_key: String,
    pub table: String,
    pub timeout_seconds: u64,
}

impl RemoteStoreConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            table: "visitors".to_string(),
            timeout_seconds: 10,
        }
    }

    /// REST URL of the visitors table
    pub fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.endpoint.trim_end_matches('/'),
            self.table
        )
    }
}

/// Which store the process writes to for its whole lifetime
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    File { path: PathBuf },
    Remote(RemoteStoreConfig),
}

/// Configuration for visit persistence
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub log_path: PathBuf,
    pub remote: Option<RemoteStoreConfig>,
    /// Replace credential-bearing header values before they are stored
    pub redact_sensitive_headers: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            remote: None,
            redact_sensitive_headers: false,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let log_path = env::var("VISITOR_LOG_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));

        let endpoint = env::var("REMOTE_STORE_URL").ok().filter(|v| !v.trim().is_empty());
        let api_key = env::var("REMOTE_STORE_KEY").ok().filter(|v| !v.trim().is_empty());

        let remote = match (endpoint, api_key) {
            (Some(endpoint), Some(api_key)) => {
                let mut remote = RemoteStoreConfig::new(endpoint.trim(), api_key.trim());
                if let Ok(table) = env::var("REMOTE_STORE_TABLE")
                    && !table.trim().is_empty()
                {
                    remote.table = table.trim().to_string();
                }
                remote.timeout_seconds = env::var("REMOTE_STORE_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|v| v.trim().parse().ok())
                    .filter(|t: &u64| *t > 0)
                    .unwrap_or(remote.timeout_seconds);
                Some(remote)
            }
            _ => None,
        };

        let redact_sensitive_headers = env::var("REDACT_SENSITIVE_HEADERS")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            log_path,
            remote,
            redact_sensitive_headers,
        }
    }

    /// Resolve the backend for this process
    pub fn backend(&self) -> StoreBackend {
        match &self.remote {
            Some(remote) => StoreBackend::Remote(remote.clone()),
            None => StoreBackend::File {
                path: self.log_path.clone(),
            },
        }
    }
}
