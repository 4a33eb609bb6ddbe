//! API response models for the JSON endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response model for the JSON visitors log endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VisitorsLogResponse {
    /// The full log rendered as preformatted text
    pub visitors_log: String,
    /// When the response was generated (ISO 8601)
    pub timestamp: String,
    /// Number of records in the log
    pub count: usize,
}

/// Error body returned by JSON endpoints when the log store fails
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: String,
}

/// Response model for the header echo endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct DebugHeadersResponse {
    /// Client IP as resolved from proxy headers and the peer address
    pub resolved_ip: String,
    /// Transport-level peer address, if known
    pub peer_address: Option<String>,
    /// Every header received, keyed by lowercase name
    pub headers: BTreeMap<String, String>,
}
