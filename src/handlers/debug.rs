//! Header echo endpoint for checking proxy configuration.

use crate::{
    handlers::app_state,
    models::DebugHeadersResponse,
    utils::http::{collect_headers, extract_client_ip, peer_address},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Echo received headers and the resolved client IP without recording a visit
#[api_v2_operation(
    summary = "Debug Headers",
    description = "Echoes every received header, the peer address and the resolved client IP.",
    tags("Debug"),
    responses(
        (status = 200, description = "Header echo", body = DebugHeadersResponse)
    )
)]
pub async fn debug_headers(req: HttpRequest) -> Result<web::Json<DebugHeadersResponse>, Error> {
    let redact = app_state(&req)
        .map(|state| state.redact_sensitive_headers)
        .unwrap_or(false);

    Ok(web::Json(DebugHeadersResponse {
        resolved_ip: extract_client_ip(&req),
        peer_address: peer_address(&req),
        headers: collect_headers(&req, redact),
    }))
}
