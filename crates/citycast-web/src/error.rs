//! Error → HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use citycast_weather::WeatherError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Weather(e) => e.kind(),
            Self::Render(_) => "render_error",
        }
    }
}

/// JSON body returned for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);

        let payload = ErrorPayload {
            error: self.kind(),
            message: format!("Something went wrong: {}", self),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
    }
}
