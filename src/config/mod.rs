//! Configuration structures and environment loading.
//!
//! Every concern has its own struct with a `Default` and a `from_env()`
//! constructor; [`AppConfig`] gathers them once at startup.

pub mod geolocation;
pub mod server;
pub mod store;

pub use geolocation::*;
pub use server::*;
pub use store::*;

use crate::telemetry::TelemetryConfig;

/// Process-wide configuration, loaded once and passed down explicitly
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub geolocation: GeolocationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            store: StoreConfig::from_env(),
            geolocation: GeolocationConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}

// Serializes tests that touch process environment variables
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
