//! Shared application state built once at startup.

use crate::{
    config::AppConfig,
    services::{AppMetrics, GeoLocator, VisitRecorder, build_store},
};
use std::sync::Arc;

/// Everything the handlers need, immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub recorder: VisitRecorder,
    pub geolocator: Arc<GeoLocator>,
    pub metrics: AppMetrics,
    pub redact_sensitive_headers: bool,
    pub metrics_enabled: bool,
}

impl AppState {
    /// Build the store, enrichment clients and metrics from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let metrics = AppMetrics::new().map_err(|e| format!("Failed to create metrics: {e}"))?;

        let store = build_store(&config.store)
            .map_err(|e| format!("Failed to initialize visit log store: {e}"))?;
        let recorder = VisitRecorder::new(store, Some(metrics.clone()));

        let geolocator = GeoLocator::new(config.geolocation.clone(), Some(metrics.clone()))
            .map_err(|e| format!("Failed to create geolocation client: {e}"))?;

        Ok(Self {
            recorder,
            geolocator: Arc::new(geolocator),
            metrics,
            redact_sensitive_headers: config.store.redact_sensitive_headers,
            metrics_enabled: config.server.metrics_enabled,
        })
    }
}
