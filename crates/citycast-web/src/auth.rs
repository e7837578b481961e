//! HTTP basic authentication for the stats page.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::{engine::general_purpose, Engine as _};

use crate::state::AppState;

const AUTH_REALM: &str = "Basic realm=\"Please enter your credentials\"";

/// The single credential pair allowed to view stats.
#[derive(Debug, Clone)]
pub struct StatsCredentials {
    username: String,
    password: String,
}

impl StatsCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check an `Authorization` header value.
    pub fn accepts(&self, header_value: &str) -> bool {
        let Some(encoded) = header_value.strip_prefix("Basic ") else {
            return false;
        };
        let Ok(decoded) = general_purpose::STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(pair) = std::str::from_utf8(&decoded) else {
            return false;
        };

        match pair.split_once(':') {
            Some((username, password)) => {
                let username_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
                let password_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
                username_ok & password_ok
            }
            None => false,
        }
    }
}

/// Constant-time byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Extractor proving the request carried valid stats credentials.
#[derive(Debug)]
pub struct StatsUser;

impl FromRequestParts<AppState> for StatsUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorized = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| state.credentials.accepts(value));

        if authorized {
            return Ok(StatsUser);
        }

        tracing::debug!("Rejected unauthenticated stats request");
        Err((
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, AUTH_REALM)],
            "Unauthorized",
        )
            .into_response())
    }
}
