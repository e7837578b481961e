use chrono::NaiveDateTime;

use crate::error::WeatherError;
use crate::types::{DisplayForecast, ForecastEntry, RawForecast};

/// Timestamp layout used by the forecast API (`2024-03-04T15:00`).
const API_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Display layout (`Mon 15:00`).
const DISPLAY_TIME_FORMAT: &str = "%a %H:%M";

/// Decode a raw forecast body and format it for `city`.
pub fn format_forecast(city: &str, raw: &str) -> Result<DisplayForecast, WeatherError> {
    let forecast: RawForecast = serde_json::from_str(raw)?;
    DisplayForecast::new(city.to_string(), forecast)
}

/// Render one timestamp, e.g. `2024-03-04T15:00` -> `Mon 15:00`.
pub fn format_time(value: &str) -> Result<String, WeatherError> {
    let parsed = NaiveDateTime::parse_from_str(value, API_TIME_FORMAT).map_err(|source| {
        WeatherError::TimeParse {
            value: value.to_string(),
            source,
        }
    })?;
    Ok(parsed.format(DISPLAY_TIME_FORMAT).to_string())
}

/// Render one temperature, e.g. `12.34` -> `12.3°C`.
pub fn format_temperature(celsius: f64) -> String {
    format!("{:.1}\u{00b0}C", celsius)
}

impl DisplayForecast {
    /// Pair up the hourly series. Fails without partial output if the
    /// series differ in length or any timestamp is malformed.
    pub fn new(city: String, forecast: RawForecast) -> Result<Self, WeatherError> {
        let hourly = forecast.hourly;
        if hourly.time.len() != hourly.temperature_2m.len() {
            return Err(WeatherError::LengthMismatch {
                times: hourly.time.len(),
                temperatures: hourly.temperature_2m.len(),
            });
        }

        let forecasts = hourly
            .time
            .iter()
            .zip(hourly.temperature_2m.iter())
            .map(|(time, temperature)| {
                Ok(ForecastEntry {
                    time: format_time(time)?,
                    temperature: format_temperature(*temperature),
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        Ok(Self { city, forecasts })
    }
}
