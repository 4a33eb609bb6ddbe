//! OpenAPI specification and app factory.

use crate::{
    handlers::{api_visitors, debug_headers, get_metrics, health, record_visit, show_log},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    state::AppState,
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Path the generated OpenAPI document is served at
pub const SPEC_PATH: &str = "/api/spec/v2";

/// Creates the OpenAPI specification for the service
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Visitor Log".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Records visitor metadata (IP address, headers, user agent, timestamp) and \
                 renders the accumulated log as HTML or JSON.\n\n\
                 ## Client IP resolution\n\
                 The client IP is taken from the first public address found in \
                 `X-Real-IP`, `X-Forwarded-For`, `X-Client-IP`, `CF-Connecting-IP`, \
                 `X-Forwarded`, `Forwarded-For` and `Forwarded`, in that order, falling \
                 back to the connection peer address. Private and loopback addresses are \
                 never recorded as the client IP; `Unknown` is used instead.\n\
                 \n\
                 These headers can be set by any client, so the resolved IP is \
                 best-effort and must not be used for access control.\n\
                 \n\
                 ## Storage\n\
                 Visits go to a local append-only text file unless `REMOTE_STORE_URL` \
                 and `REMOTE_STORE_KEY` are set, in which case they are inserted into a \
                 hosted table. The choice is made once at startup."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application with all routes and middleware.
///
/// Used by `main` for every worker and by the integration tests.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let metrics = state.metrics.clone();

    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(metrics))
        .app_data(web::Data::new(state))
        .service(web::resource("/").route(web::get().to(record_visit)))
        .service(web::resource("/show-log").route(web::get().to(show_log)))
        .service(web::resource("/visitors").route(web::get().to(show_log)))
        .service(web::resource("/api/visitors").route(web::get().to(api_visitors)))
        .service(web::resource("/debug-headers").route(web::get().to(debug_headers)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at(SPEC_PATH)
        .build()
}
