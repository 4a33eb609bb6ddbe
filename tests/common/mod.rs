//! Shared helpers for integration tests.

#![allow(dead_code)]

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, dev::ServerHandle, web};
use serde_json::Value;
use std::path::Path;
use std::sync::Mutex;
use visitor_log::{AppConfig, AppState, GeolocationConfig, RemoteStoreConfig, StoreConfig};

pub const MOCK_API_KEY: &str = "test-key";

/// App state writing to `log_path` with geolocation switched off
pub fn file_state(log_path: &Path) -> AppState {
    let config = AppConfig {
        store: StoreConfig {
            log_path: log_path.to_path_buf(),
            ..StoreConfig::default()
        },
        geolocation: GeolocationConfig::disabled(),
        ..AppConfig::default()
    };
    AppState::from_config(&config).unwrap()
}

/// Rows held by the mock table server
pub type Rows = web::Data<Mutex<Vec<Value>>>;

async fn insert_row(req: HttpRequest, rows: Rows, body: web::Json<Value>) -> HttpResponse {
    let api_key = req.headers().get("apikey").and_then(|v| v.to_str().ok());
    let bearer = req.headers().get("authorization").and_then(|v| v.to_str().ok());
    if api_key != Some(MOCK_API_KEY) || bearer != Some(format!("Bearer {MOCK_API_KEY}").as_str()) {
        return HttpResponse::Unauthorized().body("invalid api key");
    }

    rows.lock().unwrap().push(body.into_inner());
    HttpResponse::Created().finish()
}

async fn select_rows(req: HttpRequest, rows: Rows) -> HttpResponse {
    if req.headers().get("apikey").and_then(|v| v.to_str().ok()) != Some(MOCK_API_KEY) {
        return HttpResponse::Unauthorized().body("invalid api key");
    }

    let mut selected: Vec<Value> = rows.lock().unwrap().clone();
    if req.query_string().contains("order=timestamp.desc") {
        selected.sort_by(|a, b| {
            b["timestamp"]
                .as_str()
                .unwrap_or_default()
                .cmp(&a["timestamp"].as_str().unwrap_or_default())
        });
    }

    // Columns the table adds on its own
    let selected: Vec<Value> = selected
        .into_iter()
        .enumerate()
        .map(|(id, mut row)| {
            row["id"] = Value::from(id as u64 + 1);
            row
        })
        .collect();

    HttpResponse::Ok().json(selected)
}

/// Start an in-process PostgREST-style table server on an ephemeral port.
///
/// Returns the base URL, the shared rows and a handle to stop the server.
pub async fn start_mock_table() -> (String, Rows, ServerHandle) {
    let rows: Rows = web::Data::new(Mutex::new(Vec::new()));
    let server_rows = rows.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_rows.clone())
            .route("/rest/v1/visitors", web::post().to(insert_row))
            .route("/rest/v1/visitors", web::get().to(select_rows))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{addr}"), rows, handle)
}

/// Remote store configuration pointing at a mock table server
pub fn mock_remote_config(base_url: &str, api_key: &str) -> RemoteStoreConfig {
    let mut config = RemoteStoreConfig::new(base_url, api_key);
    config.timeout_seconds = 5;
    config
}

async fn geolocate(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "8.8.8.8" => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "country": "United States",
            "regionName": "California",
            "city": "Mountain View",
            "query": "8.8.8.8"
        })),
        "1.1.1.1" => HttpResponse::InternalServerError().finish(),
        other => HttpResponse::Ok().json(serde_json::json!({
            "status": "fail",
            "message": "reserved range",
            "query": other
        })),
    }
}

/// Start an in-process ip-api.com style geolocation server.
///
/// Returns the base URL (ending in `/json`) and a handle to stop the server.
pub async fn start_mock_geolocation() -> (String, ServerHandle) {
    let server = HttpServer::new(|| App::new().route("/json/{ip}", web::get().to(geolocate)))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{addr}/json"), handle)
}
