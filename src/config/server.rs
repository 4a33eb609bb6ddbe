//! HTTP server configuration.

use std::env;

/// Configuration for the HTTP listener and operational endpoints
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of actix workers; `None` lets actix pick one per core
    pub workers: Option<usize>,
    /// Whether `/metrics` serves Prometheus output
    pub metrics_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            workers: None,
            metrics_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("HOST")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.port);

        let workers = env::var("WORKERS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .filter(|w: &usize| *w > 0);

        let metrics_enabled = env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(defaults.metrics_enabled);

        Self {
            host,
            port,
            workers,
            metrics_enabled,
        }
    }

    /// Address string suitable for `HttpServer::bind`
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
