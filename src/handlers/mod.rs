//! HTTP request handlers.

pub mod app;
pub mod debug;
pub mod health;
pub mod log_view;
pub mod metrics;
pub mod visit;

pub use app::*;
pub use debug::*;
pub use health::*;
pub use log_view::*;
pub use metrics::*;
pub use visit::*;

use crate::state::AppState;
use actix_web::{Error, HttpRequest, web};

/// Shared state registered on the app, or 503 when it is missing
pub(crate) fn app_state(req: &HttpRequest) -> Result<&web::Data<AppState>, Error> {
    req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        actix_web::error::ErrorServiceUnavailable("Application state is not configured")
    })
}
