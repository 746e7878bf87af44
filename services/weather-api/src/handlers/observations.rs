//! Observation query handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use weather_common::{time, WeatherError};

use crate::state::AppState;

use super::{error_response, or_default, require};

const DEFAULT_MEASUREMENT_TYPE: &str = "temperature";
const DEFAULT_OBSERVATION_TYPE: &str = "max";
const DEFAULT_SERVICE: &str = "CLI";

/// Query parameters for the observed-highs endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ObservedHighsParams {
    pub station_id: Option<String>,
    pub measurement_type: Option<String>,
    pub observation_type: Option<String>,
    pub service: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Typed arguments after validation and defaulting. The field order
/// mirrors the query's positional binding order.
#[derive(Debug, PartialEq)]
pub struct ObservedHighsArgs {
    pub station_id: String,
    pub measurement_type: String,
    pub observation_type: String,
    pub service: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ObservedHighsParams {
    /// Apply defaults and parse the optional date bounds.
    pub fn resolve(&self) -> Result<ObservedHighsArgs, WeatherError> {
        let station_id = require(&self.station_id, "station_id")?.to_string();
        let measurement_type = or_default(&self.measurement_type, DEFAULT_MEASUREMENT_TYPE).to_string();
        let observation_type = or_default(&self.observation_type, DEFAULT_OBSERVATION_TYPE).to_string();
        let service = or_default(&self.service, DEFAULT_SERVICE).to_string();
        let start = parse_bound("start", &self.start)?;
        let end = parse_bound("end", &self.end)?;

        Ok(ObservedHighsArgs {
            station_id,
            measurement_type,
            observation_type,
            service,
            start,
            end,
        })
    }
}

fn parse_bound(param: &str, value: &Option<String>) -> Result<Option<NaiveDate>, WeatherError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(Some(time::parse_date(param, v)?)),
        _ => Ok(None),
    }
}

/// Query parameters shared by the latest-observation and
/// max-temperatures endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct StationServiceParams {
    pub station_id: Option<String>,
    pub service: Option<String>,
}

/// GET /observations/highs
pub async fn observed_highs_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ObservedHighsParams>,
) -> Response {
    let args = match params.resolve() {
        Ok(a) => a,
        Err(e) => return error_response(&e),
    };

    let result = state
        .db
        .get_observed_highs(
            &args.station_id,
            &args.measurement_type,
            &args.observation_type,
            &args.service,
            args.start,
            args.end,
        )
        .await;

    match result {
        Ok(observations) => Json(json!({
            "station_id": args.station_id,
            "service": args.service,
            "measurement_type": args.measurement_type,
            "observation_type": args.observation_type,
            "start": args.start.map(|d| time::format_date(&d)),
            "end": args.end.map(|d| time::format_date(&d)),
            "count": observations.len(),
            "observations": observations,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(station_id = %args.station_id, error = %e, "observed highs query failed");
            error_response(&e)
        }
    }
}

/// GET /observations/latest
pub async fn latest_observation_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<StationServiceParams>,
) -> Response {
    let station_id = match require(&params.station_id, "station_id") {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };
    let service = or_default(&params.service, DEFAULT_SERVICE);

    match state.db.get_most_recent_observation(station_id, service).await {
        Ok(most_recent) => Json(json!({
            "station_id": station_id,
            "service": service,
            "most_recent_observation": most_recent.map(|dt| time::format_datetime(&dt)),
        }))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /observations/temperatures/max
///
/// Rows arrive newest-first from the query and are emitted unchanged.
pub async fn max_temperatures_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<StationServiceParams>,
) -> Response {
    let station_id = match require(&params.station_id, "station_id") {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };
    let service = or_default(&params.service, DEFAULT_SERVICE);

    match state
        .db
        .get_max_temperature_observations(station_id, service)
        .await
    {
        Ok(observations) => Json(json!({
            "station_id": station_id,
            "service": service,
            "count": observations.len(),
            "observations": observations,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(station_id, error = %e, "max temperature query failed");
            error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_applies_defaults() {
        let params = ObservedHighsParams {
            station_id: Some("KNYC".to_string()),
            ..Default::default()
        };

        let args = params.resolve().unwrap();
        assert_eq!(
            args,
            ObservedHighsArgs {
                station_id: "KNYC".to_string(),
                measurement_type: "temperature".to_string(),
                observation_type: "max".to_string(),
                service: "CLI".to_string(),
                start: None,
                end: None,
            }
        );
    }

    #[test]
    fn test_resolve_keeps_explicit_values() {
        let params = ObservedHighsParams {
            station_id: Some("KMIA".to_string()),
            measurement_type: Some("precipitation".to_string()),
            observation_type: Some("total".to_string()),
            service: Some("ASOS".to_string()),
            start: Some("2025-01-01".to_string()),
            end: Some("2025-12-31".to_string()),
        };

        let args = params.resolve().unwrap();
        assert_eq!(args.measurement_type, "precipitation");
        assert_eq!(args.observation_type, "total");
        assert_eq!(args.service, "ASOS");
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(args.end, NaiveDate::from_ymd_opt(2025, 12, 31));
    }

    #[test]
    fn test_resolve_requires_station_id() {
        let err = ObservedHighsParams::default().resolve().unwrap_err();
        assert_eq!(err.to_string(), "Missing required parameter: station_id");
    }

    #[test]
    fn test_resolve_rejects_malformed_start() {
        let params = ObservedHighsParams {
            station_id: Some("KNYC".to_string()),
            start: Some("January 1st".to_string()),
            ..Default::default()
        };

        let err = params.resolve().unwrap_err();
        assert_eq!(err.http_status_code(), 400);
        assert!(err.to_string().contains("start"));
    }

    #[test]
    fn test_empty_bound_is_unbounded() {
        let params = ObservedHighsParams {
            station_id: Some("KNYC".to_string()),
            start: Some(String::new()),
            ..Default::default()
        };

        let args = params.resolve().unwrap();
        assert_eq!(args.start, None);
    }
}
