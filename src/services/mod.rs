//! Core services: IP resolution, the log stores and enrichment steps.

pub mod file_store;
pub mod geolocation;
pub mod ip_resolver;
pub mod metrics;
pub mod recorder;
pub mod remote_store;
pub mod store;
pub mod user_agent;

pub use file_store::FileLogStore;
pub use geolocation::GeoLocator;
pub use ip_resolver::{HeaderLookup, UNKNOWN_IP, resolve, resolve_ip};
pub use metrics::*;
pub use recorder::VisitRecorder;
pub use remote_store::RemoteLogStore;
pub use store::{LogStore, build_store};
