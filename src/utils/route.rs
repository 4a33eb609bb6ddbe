//! Route label extraction for metrics.

use actix_web::HttpRequest;

/// Paths served by this application; anything else is labelled `other`
const KNOWN_ROUTES: [&str; 8] = [
    "/",
    "/show-log",
    "/visitors",
    "/api/visitors",
    "/debug-headers",
    "/health",
    "/metrics",
    "/api/spec/v2",
];

/// Extract a bounded-cardinality route label from a request
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    route_label(req.path()).to_string()
}

fn route_label(path: &str) -> &str {
    KNOWN_ROUTES
        .iter()
        .find(|route| **route == path)
        .copied()
        .unwrap_or("other")
}
