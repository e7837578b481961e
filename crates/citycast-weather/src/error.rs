//! Weather pipeline error types.

use thiserror::Error;

/// Errors raised by the city coordinate store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Store unavailable")]
    Unavailable,

    #[error("Store task failed: {0}")]
    Task(String),
}

/// Errors raised while resolving, fetching or formatting a forecast.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Read(String),

    #[error("Unexpected response format: {0}")]
    Decode(String),

    #[error("No results found for {0:?}")]
    NotFound(String),

    #[error("Invalid forecast time {value:?}: {source}")]
    TimeParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Forecast has {times} times but {temperatures} temperatures")]
    LengthMismatch { times: usize, temperatures: usize },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl WeatherError {
    /// Stable label for error payloads and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network_error",
            Self::Read(_) => "read_error",
            Self::Decode(_) => "decode_error",
            Self::NotFound(_) => "not_found",
            Self::TimeParse { .. } => "time_parse_error",
            Self::LengthMismatch { .. } => "decode_error",
            Self::Store(_) => "store_error",
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
