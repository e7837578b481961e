use askama::Template;
use axum::response::Html;

use citycast_weather::{DisplayForecast, ForecastEntry};

use crate::error::ApiError;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template)]
#[template(path = "weather.html")]
pub struct WeatherTemplate {
    pub city: String,
    pub forecasts: Vec<ForecastEntry>,
}

impl From<DisplayForecast> for WeatherTemplate {
    fn from(display: DisplayForecast) -> Self {
        Self {
            city: display.city,
            forecasts: display.forecasts,
        }
    }
}

#[derive(Template)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub cities: Vec<String>,
}

/// Render a template into an HTML response.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, ApiError> {
    Ok(Html(template.render()?))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_weather_template_lists_entries() {
        let template = WeatherTemplate::from(DisplayForecast {
            city: "Montreal".to_string(),
            forecasts: vec![ForecastEntry {
                time: "Mon 15:00".to_string(),
                temperature: "12.3°C".to_string(),
            }],
        });

        let html = template.render().unwrap();
        assert!(html.contains("Montreal"));
        assert!(html.contains("Mon 15:00"));
        assert!(html.contains("12.3°C"));
    }

    #[test]
    fn test_city_name_is_escaped() {
        let template = WeatherTemplate {
            city: "<script>alert(1)</script>".to_string(),
            forecasts: vec![],
        };

        let html = template.render().unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_stats_template_lists_cities() {
        let template = StatsTemplate {
            cities: vec!["Oslo".to_string(), "Lima".to_string()],
        };

        let html = template.render().unwrap();
        let oslo = html.find("Oslo").unwrap();
        let lima = html.find("Lima").unwrap();
        assert!(oslo < lima);
    }
}
