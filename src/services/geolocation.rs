//! Best-effort IP geolocation against an ip-api.com compatible service.

use crate::{config::GeolocationConfig, services::ip_resolver::UNKNOWN_IP, services::AppMetrics};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// ip-api.com JSON response (only the fields we use)
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(rename = "regionName", default)]
    region_name: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

/// Optional enrichment step that turns an IP into a free-text location
pub struct GeoLocator {
    client: Client,
    config: GeolocationConfig,
    metrics: Option<AppMetrics>,
}

impl GeoLocator {
    /// Create a new locator with a client bounded by the configured timeout
    pub fn new(config: GeolocationConfig, metrics: Option<AppMetrics>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Look up a location for `ip`.
    ///
    /// Every failure is logged and mapped to `None`; recording never waits
    /// on more than the configured timeout.
    pub async fn locate(&self, ip: &str) -> Option<String> {
        if !self.config.enabled || ip == UNKNOWN_IP {
            return None;
        }

        match self.lookup(ip).await {
            Ok(location) => {
                tracing::debug!(ip = %ip, location = ?location, "Geolocation lookup finished");
                self.record_outcome(if location.is_some() { "success" } else { "empty" });
                location
            }
            Err(e) => {
                tracing::warn!(ip = %ip, error = %e, "Geolocation lookup failed");
                self.record_outcome("failure");
                None
            }
        }
    }

    async fn lookup(&self, ip: &str) -> Result<Option<String>, String> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), ip);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Geolocation request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!(
                "Geolocation API returned status: {}",
                response.status()
            ));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse geolocation data: {e}"))?;

        if data.status != "success" {
            return Err(format!(
                "Geolocation API reported {}: {}",
                data.status,
                data.message.as_deref().unwrap_or("no message")
            ));
        }

        Ok(format_location(&data))
    }

    fn record_outcome(&self, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_geolocation(outcome);
        }
    }
}

/// Join the non-empty parts as "City, Region, Country"
fn format_location(data: &IpApiResponse) -> Option<String> {
    let parts: Vec<&str> = [&data.city, &data.region_name, &data.country]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}
