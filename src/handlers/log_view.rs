//! Log viewer endpoints (HTML and JSON).

use crate::{
    error::StoreError,
    handlers::app_state,
    models::ErrorResponse,
    utils::html::log_page,
};
use actix_web::{Error, HttpRequest, HttpResponse, Result};
use chrono::Local;
use paperclip::actix::api_v2_operation;

const PAGE_TITLE: &str = "Visitors Log";

/// Full visitor log as an HTML page
///
/// Served at both `/show-log` and `/visitors`.
#[api_v2_operation(
    summary = "Visitor Log Page",
    description = "Returns every recorded visit as a preformatted HTML page.",
    tags("Visits"),
    responses(
        (status = 200, description = "Log page", content_type = "text/html"),
        (status = 500, description = "The log store could not be read")
    )
)]
pub async fn show_log(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;

    let response = match state.recorder.render_text().await {
        Ok(text) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(log_page(PAGE_TITLE, &text)),
        Err(StoreError::LogNotFound) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(log_page(PAGE_TITLE, "No visitors have been recorded yet.")),
        Err(e) => HttpResponse::InternalServerError()
            .content_type("text/html; charset=utf-8")
            .body(log_page(
                PAGE_TITLE,
                &format!("Error reading visitor log: {}", e.user_message()),
            )),
    };

    Ok(response)
}

/// Full visitor log for API consumers
#[api_v2_operation(
    summary = "Visitor Log JSON",
    description = "Returns the visitor log as preformatted text inside a JSON object, with a generation timestamp.",
    tags("Visits"),
    responses(
        (status = 200, description = "Visitor log", body = VisitorsLogResponse),
        (status = 500, description = "The log store could not be read", body = ErrorResponse)
    )
)]
pub async fn api_visitors(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;

    match state.recorder.render_json().await {
        Ok(log) => Ok(HttpResponse::Ok().json(log)),
        Err(e) => Ok(HttpResponse::InternalServerError().json(ErrorResponse {
            error: e.user_message(),
            timestamp: Local::now().to_rfc3339(),
        })),
    }
}
