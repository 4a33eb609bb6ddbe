//! Metrics collection and Prometheus integration service.

use prometheus::{CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::{Duration, Instant};

/// Route excluded from request metrics
pub const METRICS_ROUTE: &str = "/metrics";

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub visits_recorded_total: CounterVec,
    pub geolocation_lookups_total: CounterVec,
    pub app_uptime_seconds: Gauge,
    pub start_time: Instant,
}

impl AppMetrics {
    /// Create a new collector with its own registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        )?;

        // Append attempts by backend and outcome (success/failure)
        let visits_recorded_total = CounterVec::new(
            Opts::new("visits_recorded_total", "Visit records appended to the log store"),
            &["backend", "outcome"],
        )?;

        let geolocation_lookups_total = CounterVec::new(
            Opts::new("geolocation_lookups_total", "Geolocation lookups by outcome"),
            &["outcome"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(visits_recorded_total.clone()))?;
        registry.register(Box::new(geolocation_lookups_total.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            visits_recorded_total,
            geolocation_lookups_total,
            app_uptime_seconds,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request with method, route, status, and duration
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == METRICS_ROUTE {
            return;
        }

        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, status.as_str(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    /// Count one append attempt against the log store
    pub fn record_visit(&self, backend: &str, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.visits_recorded_total
            .with_label_values(&[backend, outcome])
            .inc();
    }

    pub fn record_geolocation(&self, outcome: &str) {
        self.geolocation_lookups_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Update the application uptime gauge
    pub fn update_uptime(&self) {
        self.app_uptime_seconds
            .set(self.start_time.elapsed().as_secs_f64());
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_recorded_series() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_request("GET", "/", 200, Duration::from_millis(12));
        metrics.record_request("GET", METRICS_ROUTE, 200, Duration::from_millis(1));
        metrics.record_visit("file", true);
        metrics.record_visit("file", false);
        metrics.record_geolocation("failure");
        metrics.update_uptime();

        let output = metrics.render().unwrap();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains("route=\"/\""));
        assert!(!output.contains("route=\"/metrics\""));
        assert!(output.contains("visits_recorded_total"));
        assert!(output.contains("outcome=\"failure\""));
        assert!(output.contains("geolocation_lookups_total"));
        assert!(output.contains("app_uptime_seconds"));
    }
}
