use std::sync::Arc;

use citycast_core::{AppError, StoreConfig};
use citycast_weather::{CoordinateCache, GeocodeClient, SqliteCityStore, WeatherClient};

use crate::auth::StatsCredentials;

pub type CityCoordinateCache = CoordinateCache<SqliteCityStore, GeocodeClient>;

/// Open the city store named by `config`.
///
/// If the store cannot be opened, startup fails when `fail_fast` is set;
/// otherwise the returned cache runs network-only.
pub fn open_city_cache(
    config: &StoreConfig,
    geocoder: GeocodeClient,
) -> Result<CityCoordinateCache, AppError> {
    match SqliteCityStore::open(&config.path) {
        Ok(store) => {
            tracing::info!("City cache at {}", config.path.display());
            Ok(CoordinateCache::new(store, geocoder))
        }
        Err(e) if config.fail_fast => Err(AppError::Database(e.to_string())),
        Err(e) => {
            tracing::error!("City cache unavailable, running network-only: {}", e);
            Ok(CoordinateCache::network_only(geocoder))
        }
    }
}

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CityCoordinateCache>,
    pub weather: Arc<WeatherClient>,
    pub credentials: Arc<StatsCredentials>,
}

impl AppState {
    pub fn new(
        cache: CityCoordinateCache,
        weather: WeatherClient,
        credentials: StatsCredentials,
    ) -> Self {
        Self {
            cache: Arc::new(cache),
            weather: Arc::new(weather),
            credentials: Arc::new(credentials),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    fn geocoder() -> GeocodeClient {
        GeocodeClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap()
    }

    fn store_config(path: std::path::PathBuf, fail_fast: bool) -> StoreConfig {
        StoreConfig { path, fail_fast }
    }

    #[test]
    fn test_open_city_cache_with_store() {
        let dir = tempdir().unwrap();
        let config = store_config(dir.path().join("cities.db"), true);

        let cache = open_city_cache(&config, geocoder()).unwrap();
        assert!(cache.has_store());
    }

    #[test]
    fn test_unopenable_store_fails_fast() {
        let dir = tempdir().unwrap();
        let config = store_config(dir.path().to_path_buf(), true);

        let result = open_city_cache(&config, geocoder());
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[test]
    fn test_unopenable_store_degrades_to_network_only() {
        let dir = tempdir().unwrap();
        let config = store_config(dir.path().to_path_buf(), false);

        let cache = open_city_cache(&config, geocoder()).unwrap();
        assert!(!cache.has_store());
    }
}
