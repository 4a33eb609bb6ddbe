//! Visit recording endpoint.

use crate::{
    handlers::app_state,
    services::user_agent,
    utils::http::visit_from_request,
};
use actix_web::{Error, HttpRequest, HttpResponse, Result};
use paperclip::actix::api_v2_operation;

/// Record a visit and echo the resolved client IP
///
/// The record is assembled from the request, enriched with a best-effort
/// location and parsed user agent, then appended to the log store. A failed
/// append is reported in the response body; it never takes the server down.
#[api_v2_operation(
    summary = "Record Visit",
    description = "Records the caller's IP address, headers and user agent, and returns the resolved IP.",
    tags("Visits"),
    responses(
        (status = 200, description = "Visit recorded", content_type = "text/plain"),
        (status = 500, description = "The visit could not be written to the log store")
    )
)]
pub async fn record_visit(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;

    let base = visit_from_request(&req, state.redact_sensitive_headers);
    let location = state.geolocator.locate(&base.ip).await;
    let agent = user_agent::summarize(&base.user_agent);
    let record = base.with_location(location).with_agent(agent);

    match state.recorder.append(&record).await {
        Ok(()) => Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(format!("Your IP address is {}", record.ip))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body(format!(
                "Your IP address is {}, but the visit could not be recorded: {}",
                record.ip,
                e.user_message()
            ))),
    }
}
