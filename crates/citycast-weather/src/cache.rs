//! Cache-or-fetch coordinate resolution.
//!
//! Coordinates are looked up in the `CityStore` first; on a miss the
//! geocoder is called and the result persisted. Store reads that fail are
//! treated as misses so a broken store never blocks a lookup.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{StoreError, WeatherError};
use crate::geocode::Geocoder;
use crate::store::CityStore;
use crate::types::Coordinate;

/// Maximum number of names returned by `recent_cities`.
pub const RECENT_CITIES_LIMIT: usize = 10;

pub struct CoordinateCache<S, G> {
    store: Option<Arc<Mutex<S>>>,
    geocoder: G,
}

impl<S, G> CoordinateCache<S, G>
where
    S: CityStore + 'static,
    G: Geocoder,
{
    pub fn new(store: S, geocoder: G) -> Self {
        Self {
            store: Some(Arc::new(Mutex::new(store))),
            geocoder,
        }
    }

    /// A cache without a store: every lookup goes to the geocoder.
    pub fn network_only(geocoder: G) -> Self {
        Self {
            store: None,
            geocoder,
        }
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Resolve `city` to a coordinate, consulting the store first.
    ///
    /// A failed write after a successful geocode is returned as an error.
    pub async fn resolve(&self, city: &str) -> Result<Coordinate, WeatherError> {
        if let Some(store) = &self.store {
            let name = city.to_string();
            match Self::with_store(store, move |s| s.find(&name)).await {
                Ok(Some(coordinate)) => {
                    tracing::debug!("Cache hit for {}", city);
                    return Ok(coordinate);
                }
                Ok(None) => tracing::debug!("Cache miss for {}", city),
                Err(e) => tracing::warn!("Cache read failed for {}, fetching: {}", city, e),
            }
        }

        let coordinate = self.geocoder.lookup(city).await?;

        if let Some(store) = &self.store {
            let name = city.to_string();
            Self::with_store(store, move |s| s.insert(&name, coordinate)).await?;
            tracing::info!("Cached coordinates for {}", city);
        }

        Ok(coordinate)
    }

    /// Most recently cached city names, newest first.
    pub async fn recent_cities(&self) -> Result<Vec<String>, WeatherError> {
        let store = self.store.as_ref().ok_or(StoreError::Unavailable)?;
        let names = Self::with_store(store, |s| s.recent(RECENT_CITIES_LIMIT)).await?;
        Ok(names)
    }

    async fn with_store<T, F>(store: &Arc<Mutex<S>>, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T, StoreError> + Send + 'static,
    {
        let store = Arc::clone(store);
        tokio::task::spawn_blocking(move || op(&store.lock()))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }
}
