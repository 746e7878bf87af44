//! PostgreSQL data access layer.
//!
//! One shared connection pool, one typed method per supported query.
//! Arguments are bound positionally in the order each query file
//! documents; the binding order is part of the contract with the SQL
//! text. Row order is whatever the query's ORDER BY produced, never
//! re-sorted here.

use std::path::Path;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use weather_common::time;
use weather_common::{WeatherError, WeatherResult};

use crate::queries::{QueryId, QueryStore};

/// Bound on any single query execution.
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Database connection pool and query operations.
pub struct WeatherDb {
    pool: PgPool,
    queries: QueryStore,
}

impl WeatherDb {
    /// Connect to the database and load the query set.
    pub async fn connect(database_url: &str, sql_dir: &Path) -> WeatherResult<Self> {
        let queries = QueryStore::load(sql_dir)?;

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await
            .map_err(|e| WeatherError::DatabaseError(format!("Connection failed: {}", e)))?;

        tracing::info!(queries = queries.loaded_count(), "database pool ready");

        Ok(Self { pool, queries })
    }

    /// Load the query set and build a pool that connects on first use.
    ///
    /// Request paths that never execute a query (parameter validation
    /// failures, static endpoints) never open a connection.
    pub fn connect_lazy(database_url: &str, sql_dir: &Path) -> WeatherResult<Self> {
        let queries = QueryStore::load(sql_dir)?;

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy(database_url)
            .map_err(|e| WeatherError::DatabaseError(format!("Invalid database URL: {}", e)))?;

        Ok(Self { pool, queries })
    }

    async fn run<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, sqlx::Error>>,
    ) -> WeatherResult<T> {
        match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
            Ok(result) => result.map_err(|e| WeatherError::DatabaseError(e.to_string())),
            Err(_) => Err(WeatherError::DatabaseError(format!(
                "query timed out after {}s",
                QUERY_TIMEOUT.as_secs()
            ))),
        }
    }

    /// Forecasted daily highs for a location and provider, excluding
    /// forecasts issued before the cutoff date.
    ///
    /// Binds in order: (location, cutoff, provider).
    pub async fn get_forecasted_highs(
        &self,
        location: &str,
        cutoff: NaiveDate,
        provider: &str,
    ) -> WeatherResult<Vec<ForecastedHigh>> {
        let sql = self.queries.read(QueryId::ForecastedHighs)?;
        self.run(
            sqlx::query_as::<_, ForecastedHigh>(sql)
                .bind(location)
                .bind(cutoff)
                .bind(provider)
                .fetch_all(&self.pool),
        )
        .await
    }

    /// Observed high readings for a station over an optional date range.
    ///
    /// Binds in order: (station_id, measurement_type, observation_type,
    /// service, start, end). A `None` bound leaves that side of the range
    /// open.
    pub async fn get_observed_highs(
        &self,
        station_id: &str,
        measurement_type: &str,
        observation_type: &str,
        service: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> WeatherResult<Vec<Observation>> {
        let sql = self.queries.read(QueryId::ObservedHighs)?;
        self.run(
            sqlx::query_as::<_, Observation>(sql)
                .bind(station_id)
                .bind(measurement_type)
                .bind(observation_type)
                .bind(service)
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool),
        )
        .await
    }

    /// Timestamp of the most recent observation for a station, if any.
    ///
    /// Binds in order: (station_id, service).
    pub async fn get_most_recent_observation(
        &self,
        station_id: &str,
        service: &str,
    ) -> WeatherResult<Option<NaiveDateTime>> {
        let sql = self.queries.read(QueryId::MostRecentObservation)?;
        self.run(
            sqlx::query_scalar::<_, Option<NaiveDateTime>>(sql)
                .bind(station_id)
                .bind(service)
                .fetch_one(&self.pool),
        )
        .await
    }

    /// Maximum-temperature observations for a station, newest first.
    ///
    /// Binds in order: (station_id, service). Descending timestamp order
    /// comes from the query text.
    pub async fn get_max_temperature_observations(
        &self,
        station_id: &str,
        service: &str,
    ) -> WeatherResult<Vec<Observation>> {
        let sql = self.queries.read(QueryId::MaxTemperatureObservations)?;
        self.run(
            sqlx::query_as::<_, Observation>(sql)
                .bind(station_id)
                .bind(service)
                .fetch_all(&self.pool),
        )
        .await
    }

    /// Distinct forecast provider names.
    pub async fn get_distinct_forecast_providers(&self) -> WeatherResult<Vec<String>> {
        let sql = self.queries.read(QueryId::DistinctForecastProviders)?;
        self.run(sqlx::query_scalar::<_, String>(sql).fetch_all(&self.pool))
            .await
    }

    /// Distinct forecast location codes.
    pub async fn get_distinct_forecast_locations(&self) -> WeatherResult<Vec<String>> {
        let sql = self.queries.read(QueryId::DistinctForecastLocations)?;
        self.run(sqlx::query_scalar::<_, String>(sql).fetch_all(&self.pool))
            .await
    }
}

/// One forecasted daily high.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ForecastedHigh {
    #[serde(serialize_with = "time::serialize_date")]
    pub date: NaiveDate,
    pub forecasted_high: f64,
}

/// One observation row.
///
/// Not every query selects every column; `date` is only present in the
/// observed-highs result and is skipped in JSON when absent.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Observation {
    #[serde(serialize_with = "time::serialize_datetime")]
    pub timestamp: NaiveDateTime,
    #[sqlx(default)]
    #[serde(
        serialize_with = "time::serialize_opt_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    pub station_id: String,
    pub measurement_type: String,
    pub observation_type: String,
    pub value: f64,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn observation(day: u32, date: Option<NaiveDate>) -> Observation {
        Observation {
            timestamp: NaiveDate::from_ymd_opt(2025, 10, day)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            date,
            station_id: "KMIA".to_string(),
            measurement_type: "temperature".to_string(),
            observation_type: "max".to_string(),
            value: 85.5,
            service: "CLI".to_string(),
        }
    }

    #[test]
    fn test_observation_serializes_timestamp_as_iso_string() {
        let json = serde_json::to_value(observation(29, None)).unwrap();
        assert_eq!(json["timestamp"], "2025-10-29T14:00:00");
        assert_eq!(json["value"], 85.5);
        assert_eq!(json["service"], "CLI");
        assert!(json.get("date").is_none());
    }

    #[test]
    fn test_observation_with_date_column() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 29).unwrap();
        let json = serde_json::to_value(observation(29, Some(date))).unwrap();
        assert_eq!(json["date"], "2025-10-29");
    }

    #[test]
    fn test_forecasted_high_shape() {
        let row = ForecastedHigh {
            date: NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
            forecasted_high: 75.5,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"date": "2025-09-07", "forecasted_high": 75.5})
        );
    }

    #[test]
    fn test_row_order_survives_serialization() {
        let rows = vec![observation(29, None), observation(28, None)];
        let json = serde_json::to_value(&rows).unwrap();
        let timestamps: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["timestamp"].as_str().unwrap())
            .collect();
        assert_eq!(timestamps, vec!["2025-10-29T14:00:00", "2025-10-28T14:00:00"]);
    }

    #[tokio::test]
    async fn test_connect_lazy_does_not_touch_the_network() {
        let dir = tempfile::tempdir().unwrap();
        for id in QueryId::ALL {
            std::fs::write(dir.path().join(id.file_name()), "SELECT 1;").unwrap();
        }
        // Unroutable host: construction must still succeed.
        let db = WeatherDb::connect_lazy("postgres://user:pw@db.invalid:5432/weather", dir.path());
        assert!(db.is_ok());
    }
}
