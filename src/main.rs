use actix_web::HttpServer;
use tracing::{error, info};
use visitor_log::{AppConfig, AppState, StoreBackend, create_app, init_tracing};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env();

    if let Err(e) = init_tracing(&config.telemetry) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let state = AppState::from_config(&config).map_err(|e| {
        error!(error = %e, "Startup failed");
        std::io::Error::other(e)
    })?;

    match config.store.backend() {
        StoreBackend::File { path } => info!(path = %path.display(), "Recording visits to log file"),
        StoreBackend::Remote(remote) => {
            info!(table = %remote.table, "Recording visits to remote table store")
        }
    }

    let (host, port) = config.server.bind_address();
    info!(host = %host, port, geolocation = config.geolocation.enabled, "Server starting");

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server.bind((host.as_str(), port))?.run().await
}
