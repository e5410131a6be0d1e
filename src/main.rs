use mimalloc::MiMalloc;
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_telemetry::{config, state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_telemetry=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();
    let addr = format!("0.0.0.0:{}", config.port);
    let dashboard_dir = config.dashboard_dir.clone();
    let vehicle_id = config.vehicle_id.clone();
    let state = state::AppState::new(config);

    let serve_dir = ServeDir::new(&dashboard_dir)
        .not_found_service(ServeFile::new(format!("{}/index.html", dashboard_dir)));

    let app = trip_telemetry::app(state).fallback_service(serve_dir);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Trip telemetry for {} listening on {}", vehicle_id, addr);
    tracing::info!("Live feed: POST http://{}/api/live/samples", addr);
    tracing::info!("History: GET http://{}/api/history", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
