//! HTTP surface for Citycast.
//!
//! Serves the landing page, the weather lookup and the password-protected
//! recent-cities page.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;
pub mod views;

use std::net::SocketAddr;
use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use auth::{StatsCredentials, StatsUser};
pub use error::ApiError;
pub use state::{open_city_cache, AppState, CityCoordinateCache};

/// Create the HTTP router
pub fn create_router(state: AppState, assets_dir: Option<&Path>) -> Router {
    let api_router = Router::new().route("/hello", get(handlers::hello));

    let mut router = Router::new()
        .nest("/api", api_router)
        .route("/", get(handlers::index))
        .route("/weather", get(handlers::weather))
        .route("/stats", get(handlers::stats))
        .route("/health", get(handlers::health_check));

    if let Some(dir) = assets_dir {
        router = router.nest_service("/assets", ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Bind `addr` and serve `router` until the process exits.
pub async fn run_http_server(router: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await
}
