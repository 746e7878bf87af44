//! HTTP request handlers.

pub mod forecast;
pub mod kalshi;
pub mod meta;
pub mod observations;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use weather_common::WeatherError;

/// Render an error as its JSON body with the mapped status code.
pub(crate) fn error_response(err: &WeatherError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// A required query parameter: absent or empty fails validation.
pub(crate) fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, WeatherError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(WeatherError::MissingParameter(name.to_string())),
    }
}

/// An optional query parameter with a fallback; empty counts as absent.
pub(crate) fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}
