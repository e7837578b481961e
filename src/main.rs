use std::time::Duration;

use anyhow::Result;
use citycast_core::{AppError, Config};
use citycast_weather::{GeocodeClient, WeatherClient};
use citycast_web::{AppState, StatsCredentials};

#[tokio::main]
async fn main() -> Result<()> {
    citycast_core::init()?;

    if let Err(e) = run().await {
        tracing::error!("{} ({})", e.user_message(), e);
        return Err(e.into());
    }

    Ok(())
}

async fn run() -> Result<(), AppError> {
    let (config, _validation) = Config::load_validated()?;
    let addr = config.bind_addr()?;
    let timeout = Duration::from_secs(config.api.timeout_secs);

    let geocoder = GeocodeClient::new(&config.api.geocoding_url, timeout)
        .map_err(|e| AppError::Server(e.to_string()))?;
    let weather = WeatherClient::new(&config.api.forecast_url, timeout)
        .map_err(|e| AppError::Server(e.to_string()))?;
    let cache = citycast_web::open_city_cache(&config.store, geocoder)?;
    if !cache.has_store() {
        tracing::warn!("Recent cities are unavailable without the city cache");
    }

    let state = AppState::new(
        cache,
        weather,
        StatsCredentials::new(&config.stats.username, &config.stats.password),
    );

    let assets_dir = config.server.assets_dir.as_path();
    let assets_dir = assets_dir.is_dir().then_some(assets_dir);
    let router = citycast_web::create_router(state, assets_dir);

    tracing::info!("Citycast started");
    citycast_web::run_http_server(router, addr).await?;

    Ok(())
}
