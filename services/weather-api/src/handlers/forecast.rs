//! Forecast query handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use weather_common::time;

use crate::state::AppState;

use super::{error_response, require};

/// Forecasts issued before this date are excluded unless the caller
/// overrides the cutoff.
pub const DEFAULT_CUTOFF: &str = "2025-09-06";

/// Query parameters for the forecasted-highs endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ForecastHighsParams {
    pub location: Option<String>,
    pub provider: Option<String>,
    pub cutoff: Option<String>,
}

/// GET /forecast/highs
pub async fn forecast_highs_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ForecastHighsParams>,
) -> Response {
    let location = match require(&params.location, "location") {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };

    let provider = match require(&params.provider, "provider") {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };

    let cutoff_str = params.cutoff.as_deref().unwrap_or(DEFAULT_CUTOFF);
    let cutoff = match time::parse_date("cutoff", cutoff_str) {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };

    match state.db.get_forecasted_highs(location, cutoff, provider).await {
        Ok(rows) => Json(json!({
            "location": location,
            "provider": provider,
            "cutoff": cutoff_str,
            "forecasted_highs": rows,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(location, provider, error = %e, "forecasted highs query failed");
            error_response(&e)
        }
    }
}

/// GET /forecast/providers
pub async fn providers_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.db.get_distinct_forecast_providers().await {
        Ok(providers) => Json(json!({ "providers": providers })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /forecast/locations
pub async fn locations_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.db.get_distinct_forecast_locations().await {
        Ok(locations) => Json(json!({ "locations": locations })).into_response(),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cutoff_is_a_valid_date() {
        assert!(time::parse_date("cutoff", DEFAULT_CUTOFF).is_ok());
    }
}
