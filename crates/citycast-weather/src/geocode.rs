//! Forward geocoding: convert a city name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::{Coordinate, GeoResponse};

pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Something that can resolve a city name to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn lookup(&self, city: &str) -> Result<Coordinate, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up `city` and return the first match.
    ///
    /// Fails with `NotFound` when the API returns no results.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, city: &str) -> Result<Coordinate, WeatherError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let parsed: GeoResponse = serde_json::from_slice(&body)?;

        let coordinate = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(city.to_string()))?;

        tracing::debug!(
            "Geocoded {} to {}, {}",
            city,
            coordinate.latitude,
            coordinate.longitude
        );
        Ok(coordinate)
    }
}

#[async_trait]
impl Geocoder for GeocodeClient {
    async fn lookup(&self, city: &str) -> Result<Coordinate, WeatherError> {
        self.search(city).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeocodeClient {
        GeocodeClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_first_result() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("name", "Montreal"))
            .and(query_param("count", "1"))
            .and(query_param("language", "en"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"name": "Montreal", "latitude": 45.50884, "longitude": -73.58781},
                    {"name": "Montréal-Est", "latitude": 45.63202, "longitude": -73.5075}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let coordinate = client_for(&mock_server).search("Montreal").await.unwrap();

        assert_eq!(coordinate, Coordinate::new(45.50884, -73.58781));
    }

    #[tokio::test]
    async fn test_search_escapes_city_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("name", "São Paulo & co"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"latitude": -23.5475, "longitude": -46.63611}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let coordinate = client_for(&mock_server)
            .search("São Paulo & co")
            .await
            .unwrap();

        assert_eq!(coordinate.latitude, -23.5475);
    }

    #[tokio::test]
    async fn test_empty_results_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).search("Atlantis").await;

        assert!(matches!(result, Err(WeatherError::NotFound(city)) if city == "Atlantis"));
    }

    #[tokio::test]
    async fn test_missing_results_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "generationtime_ms": 0.4
            })))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).search("Atlantis").await;

        assert!(matches!(result, Err(WeatherError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).search("Montreal").await;

        assert!(matches!(result, Err(WeatherError::Decode(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).search("Montreal").await;

        assert!(matches!(result, Err(WeatherError::Network(_))));
    }
}
