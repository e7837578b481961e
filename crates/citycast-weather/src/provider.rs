use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::Coordinate;

pub const FORECAST_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Client for the hourly forecast endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the hourly temperature forecast for `coordinate`.
    ///
    /// Returns the body untouched; decoding happens in the formatter.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_raw(&self, coordinate: Coordinate) -> Result<String, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        let latitude = format!("{:.6}", coordinate.latitude);
        let longitude = format!("{:.6}", coordinate.longitude);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("hourly", "temperature_2m"),
            ])
            .send()
            .await?
            .error_for_status()?;

        response
            .text()
            .await
            .map_err(|e| WeatherError::Read(e.to_string()))
    }
}
