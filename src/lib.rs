pub mod analytics;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod session;
pub mod state;
pub mod types;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Every API route with the shared layers applied.
pub fn app(state: state::AppState) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .merge(routes::health::router())
        .merge(routes::history::router())
        .merge(routes::live::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
