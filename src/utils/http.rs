//! HTTP utility functions for extracting request information.

use crate::{models::VisitRecord, services::ip_resolver};
use actix_web::HttpRequest;
use std::collections::BTreeMap;

/// Placeholder stored instead of credential-bearing header values
pub const REDACTED: &str = "[REDACTED]";

/// Headers whose values are replaced when redaction is enabled
const SENSITIVE_HEADERS: [&str; 5] = [
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
];

/// Extract the best-guess public client IP for a request
///
/// Proxy headers are consulted first, then the connection peer address.
/// Returns `"Unknown"` when no public address is available.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    let peer = peer_address(req);
    ip_resolver::resolve(req.headers(), peer.as_deref())
}

/// Transport-level peer address, including the port
pub fn peer_address(req: &HttpRequest) -> Option<String> {
    req.peer_addr().map(|addr| addr.to_string())
}

/// Extract user agent from request headers
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    header_string(req, "User-Agent")
}

pub fn extract_referrer(req: &HttpRequest) -> Option<String> {
    header_string(req, "Referer").filter(|r| !r.is_empty())
}

fn header_string(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

/// Every request header as lowercase name → value.
///
/// Repeated headers are joined with `", "`; values that are not valid
/// visible ASCII are decoded lossily.
pub fn collect_headers(req: &HttpRequest, redact_sensitive: bool) -> BTreeMap<String, String> {
    let mut headers: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in req.headers().iter() {
        let value = match value.to_str() {
            Ok(v) => v.to_string(),
            Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
        };
        let value = if redact_sensitive && SENSITIVE_HEADERS.contains(&name.as_str()) {
            REDACTED.to_string()
        } else {
            value
        };

        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    headers
}

/// Full request URL as seen by the client
pub fn request_url(req: &HttpRequest) -> String {
    let conn = req.connection_info();
    format!("{}://{}{}", conn.scheme(), conn.host(), req.uri())
}

/// Assemble the base visit record for a request.
///
/// Location and agent enrichment are added by the caller.
pub fn visit_from_request(req: &HttpRequest, redact_sensitive: bool) -> VisitRecord {
    VisitRecord::new(
        extract_client_ip(req),
        req.method().to_string(),
        req.path().to_string(),
        request_url(req),
        extract_user_agent(req),
        collect_headers(req, redact_sensitive),
    )
    .with_referrer(extract_referrer(req))
}
