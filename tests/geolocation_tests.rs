//! Geolocation enrichment against an in-process ip-api.com style server.

mod common;

use actix_web::test;
use common::start_mock_geolocation;
use serde_json::Value;
use visitor_log::{AppConfig, AppState, GeoLocator, GeolocationConfig, StoreConfig, create_app};

fn config(base_url: &str) -> GeolocationConfig {
    GeolocationConfig {
        enabled: true,
        base_url: base_url.to_string(),
        timeout_seconds: 2,
    }
}

#[actix_web::test]
async fn test_locate_success_and_failures() {
    let (base_url, handle) = start_mock_geolocation().await;
    let locator = GeoLocator::new(config(&base_url), None).unwrap();

    assert_eq!(
        locator.locate("8.8.8.8").await.as_deref(),
        Some("Mountain View, California, United States")
    );
    // Service reports "fail"
    assert_eq!(locator.locate("203.0.113.1").await, None);
    // Service errors out
    assert_eq!(locator.locate("1.1.1.1").await, None);
    // Never looked up
    assert_eq!(locator.locate("Unknown").await, None);

    handle.stop(false).await;
}

#[actix_web::test]
async fn test_recorded_visit_carries_location() {
    let (base_url, handle) = start_mock_geolocation().await;
    let dir = tempfile::tempdir().unwrap();

    let app_config = AppConfig {
        store: StoreConfig {
            log_path: dir.path().join("log.txt"),
            ..StoreConfig::default()
        },
        geolocation: config(&base_url),
        ..AppConfig::default()
    };
    let app = test::init_service(create_app(AppState::from_config(&app_config).unwrap())).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("X-Forwarded-For", "8.8.8.8"))
        .to_request();
    test::call_service(&app, req).await;

    // A failed lookup still records the visit, just without a location
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("X-Forwarded-For", "1.1.1.1"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/visitors").to_request();
    let json: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json["count"], 2);

    let log = json["visitors_log"].as_str().unwrap();
    assert_eq!(log.matches("Location: ").count(), 1);
    assert!(log.contains("Location: Mountain View, California, United States"));

    handle.stop(false).await;
}
