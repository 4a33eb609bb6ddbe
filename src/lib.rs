//! Visitor Log - records visitor metadata and replays the log
//!
//! Every `GET /` resolves the caller's public IP from proxy headers and the
//! peer address, assembles a visit record (timestamp, method, path, URL,
//! referrer, user agent, headers) with an optional geolocation and parsed
//! user agent, and appends it to an append-only log store. The log can be read
//! back as HTML (`/show-log`, `/visitors`) or JSON (`/api/visitors`).
//!
//! ## Architecture
//!
//! - `services/ip_resolver` - best-effort public client IP heuristic
//! - `services/store` - the `LogStore` capability with file and remote table backends
//! - `services/recorder` - append/read/render front door used by the handlers
//! - `services/geolocation`, `services/user_agent` - optional enrichment
//! - `handlers/` - HTTP endpoints and the app factory
//! - `middleware/` - request IDs and Prometheus metrics
//! - `config/` - environment configuration, loaded once at startup
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use visitor_log::{AppConfig, AppState, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = AppConfig::from_env();
//!     let state = AppState::from_config(&config).map_err(std::io::Error::other)?;
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind(config.server.bind_address())?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use config::{AppConfig, GeolocationConfig, RemoteStoreConfig, ServerConfig, StoreBackend, StoreConfig};
pub use error::StoreError;
pub use handlers::{
    api_visitors, create_app, create_openapi_spec, debug_headers, get_metrics, health,
    record_visit, show_log,
};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    AgentSummary, DebugHeadersResponse, ErrorResponse, HealthResponse, VisitRecord,
    VisitorsLogResponse,
};
pub use services::{
    AppMetrics, FileLogStore, GeoLocator, HeaderLookup, LogStore, RemoteLogStore, UNKNOWN_IP,
    VisitRecorder, build_store, resolve, resolve_ip,
};
pub use state::AppState;
pub use telemetry::{TelemetryConfig, init_tracing};
pub use utils::extract_client_ip;
