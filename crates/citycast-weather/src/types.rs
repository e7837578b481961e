use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Geocoding search response. Open-Meteo omits `results` when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoResponse {
    #[serde(default)]
    pub results: Vec<Coordinate>,
}

/// Hourly forecast as returned by the forecast API
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub hourly: Hourly,
}

/// Parallel hourly series; index i of each refers to the same hour
#[derive(Debug, Clone, Deserialize)]
pub struct Hourly {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
}

/// One display row of a forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastEntry {
    /// e.g. `Mon 15:00`
    pub time: String,
    /// e.g. `12.3°C`
    pub temperature: String,
}

/// Forecast ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayForecast {
    pub city: String,
    pub forecasts: Vec<ForecastEntry>,
}
