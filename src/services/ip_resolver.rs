//! Best-effort public client IP resolution.
//!
//! Proxy headers are inspected in a fixed priority order and every candidate
//! is re-validated: only addresses outside the private and loopback ranges are
//! accepted. Any client can forge these headers, so the result is a hint for
//! logging and never an identity.

use actix_web::http::header::HeaderMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// Sentinel returned when no public address can be determined
pub const UNKNOWN_IP: &str = "Unknown";

/// Proxy headers checked for client addresses, highest priority first
pub const PROXY_HEADERS: [&str; 7] = [
    "X-Real-IP",
    "X-Forwarded-For",
    "X-Client-IP",
    "CF-Connecting-IP", // Cloudflare
    "X-Forwarded",
    "Forwarded-For",
    "Forwarded",
];

/// Read access to request headers by case-insensitive name
pub trait HeaderLookup {
    /// All values of the header, in the order received
    fn header_values(&self, name: &str) -> Vec<&str>;
}

impl HeaderLookup for HeaderMap {
    fn header_values(&self, name: &str) -> Vec<&str> {
        self.get_all(name).filter_map(|v| v.to_str().ok()).collect()
    }
}

impl<S: BuildHasher> HeaderLookup for HashMap<String, String, S> {
    fn header_values(&self, name: &str) -> Vec<&str> {
        self.iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

impl HeaderLookup for BTreeMap<String, String> {
    fn header_values(&self, name: &str) -> Vec<&str> {
        self.iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Resolve the client IP as a string, or [`UNKNOWN_IP`] when nothing qualifies
pub fn resolve<H: HeaderLookup + ?Sized>(headers: &H, peer_address: Option<&str>) -> String {
    resolve_ip(headers, peer_address)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// Resolve the first public address from proxy headers, then the peer address
pub fn resolve_ip<H: HeaderLookup + ?Sized>(headers: &H, peer_address: Option<&str>) -> Option<IpAddr> {
    for header_name in PROXY_HEADERS {
        for value in headers.header_values(header_name) {
            for token in value.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                if let Some(ip) = parse_candidate(token).filter(is_public) {
                    tracing::trace!(header = header_name, ip = %ip, "Client IP taken from proxy header");
                    return Some(ip);
                }
            }
        }
    }

    peer_address
        .map(str::trim)
        .and_then(parse_address)
        .filter(is_public)
}

/// Parse one comma-separated token from a proxy header.
///
/// Handles `Forwarded` style `for=` parameters, quoting and bracketed IPv6
/// in addition to bare addresses.
fn parse_candidate(token: &str) -> Option<IpAddr> {
    let token = if token.contains('=') {
        token.split(';').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            key.trim().eq_ignore_ascii_case("for").then(|| value.trim())
        })?
    } else {
        token
    };

    parse_address(token.trim_matches('"'))
}

/// Parse an address that may carry a port or IPv6 brackets
fn parse_address(value: &str) -> Option<IpAddr> {
    if value.is_empty() {
        return None;
    }
    if let Ok(ip) = value.parse::<IpAddr>() {
        return Some(ip);
    }
    if let Ok(socket) = value.parse::<SocketAddr>() {
        return Some(socket.ip());
    }
    value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .and_then(|inner| inner.parse::<Ipv6Addr>().ok())
        .map(IpAddr::V6)
}

/// Whether an address is outside the private-use, loopback and other
/// non-routable local ranges
pub fn is_public(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_public_v4(&v4),
            None => {
                let first_segment = v6.segments()[0];
                let unique_local = (first_segment & 0xfe00) == 0xfc00;
                let link_local = (first_segment & 0xffc0) == 0xfe80;
                !(v6.is_loopback() || v6.is_unspecified() || unique_local || link_local)
            }
        },
    }
}

fn is_public_v4(ip: &Ipv4Addr) -> bool {
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast())
}
