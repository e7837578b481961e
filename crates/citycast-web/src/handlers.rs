use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use citycast_weather::format_forecast;

use crate::auth::StatsUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::views::{render, IndexTemplate, StatsTemplate, WeatherTemplate};

/// Query params for the weather page
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

/// GET / - Landing page
pub async fn index() -> Result<Html<String>, ApiError> {
    render(&IndexTemplate)
}

/// GET /weather?city= - Resolve, fetch and format a forecast
pub async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<Html<String>, ApiError> {
    let coordinate = state.cache.resolve(&params.city).await?;
    let raw = state.weather.fetch_raw(coordinate).await?;
    let display = format_forecast(&params.city, &raw)?;

    render(&WeatherTemplate::from(display))
}

/// GET /stats - Recently looked-up cities
pub async fn stats(_user: StatsUser, State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let cities = state.cache.recent_cities().await?;
    render(&StatsTemplate { cities })
}

/// GET /api/hello
pub async fn hello() -> &'static str {
    "Hello!"
}

/// GET /health - Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}
