//! Weather lookup for Citycast
//!
//! Resolves city names to coordinates via the Open-Meteo geocoding API,
//! caches the result in SQLite, fetches hourly forecasts and formats them
//! for display.

pub mod cache;
pub mod error;
pub mod formatter;
pub mod geocode;
pub mod provider;
pub mod store;
pub mod types;

pub use cache::{CoordinateCache, RECENT_CITIES_LIMIT};
pub use error::{StoreError, WeatherError};
pub use formatter::format_forecast;
pub use geocode::{GeocodeClient, Geocoder};
pub use provider::WeatherClient;
pub use store::{CityStore, SqliteCityStore};
pub use types::*;
