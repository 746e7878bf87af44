//! Named SQL query store.
//!
//! Queries are identified by a closed enum rather than raw file names, so
//! an unknown identifier is unrepresentable and no caller-supplied string
//! ever reaches the filesystem. The text for each identifier is loaded
//! once from a directory of `.sql` files and is immutable afterwards.

use std::collections::HashSet;
use std::path::Path;

use weather_common::{WeatherError, WeatherResult};

/// Identifiers for the supported queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryId {
    ForecastedHighs,
    ObservedHighs,
    MostRecentObservation,
    MaxTemperatureObservations,
    DistinctForecastProviders,
    DistinctForecastLocations,
}

impl QueryId {
    pub const ALL: [QueryId; 6] = [
        QueryId::ForecastedHighs,
        QueryId::ObservedHighs,
        QueryId::MostRecentObservation,
        QueryId::MaxTemperatureObservations,
        QueryId::DistinctForecastProviders,
        QueryId::DistinctForecastLocations,
    ];

    /// The exact file name this query is loaded from.
    pub fn file_name(&self) -> &'static str {
        match self {
            QueryId::ForecastedHighs => "get_forecasted_highs.sql",
            QueryId::ObservedHighs => "get_observed_highs.sql",
            QueryId::MostRecentObservation => "get_most_recent_observation.sql",
            QueryId::MaxTemperatureObservations => "get_max_temperature_observations.sql",
            QueryId::DistinctForecastProviders => "get_distinct_forecast_providers.sql",
            QueryId::DistinctForecastLocations => "get_distinct_forecast_locations.sql",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|q| q == self).unwrap_or(0)
    }
}

/// Immutable set of query texts loaded at construction.
pub struct QueryStore {
    texts: [Option<String>; 6],
}

impl QueryStore {
    /// Load query texts from a directory.
    ///
    /// Enumerates regular files with the `.sql` suffix in `dir` (not
    /// recursing into subdirectories), then reads the text for each
    /// [`QueryId`] whose file name appears in the enumerated set. A file
    /// missing here surfaces later as [`WeatherError::QueryNotFound`]
    /// from [`read`](Self::read), so a misconfigured deployment is
    /// distinguishable from a database failure at request time.
    pub fn load(dir: &Path) -> WeatherResult<Self> {
        let mut present: HashSet<String> = HashSet::new();

        let entries = std::fs::read_dir(dir).map_err(|e| {
            WeatherError::DatabaseError(format!("cannot read query directory {:?}: {}", dir, e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                WeatherError::DatabaseError(format!("cannot read query directory entry: {}", e))
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    present.insert(name.to_string());
                }
            }
        }

        let mut texts: [Option<String>; 6] = Default::default();
        for id in QueryId::ALL {
            // Exact match against the enumerated set; the name is never
            // joined from caller input.
            if present.contains(id.file_name()) {
                let text = std::fs::read_to_string(dir.join(id.file_name())).map_err(|e| {
                    WeatherError::DatabaseError(format!(
                        "cannot read query file {}: {}",
                        id.file_name(),
                        e
                    ))
                })?;
                texts[id.index()] = Some(text);
            } else {
                tracing::warn!(query = id.file_name(), "query file missing at load");
            }
        }

        Ok(Self { texts })
    }

    /// Get the SQL text for a query.
    pub fn read(&self, id: QueryId) -> WeatherResult<&str> {
        self.texts[id.index()]
            .as_deref()
            .ok_or_else(|| WeatherError::QueryNotFound(id.file_name().to_string()))
    }

    /// Number of queries with loaded text.
    pub fn loaded_count(&self) -> usize {
        self.texts.iter().filter(|t| t.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_query(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_load_reads_all_present_queries() {
        let dir = tempfile::tempdir().unwrap();
        for id in QueryId::ALL {
            write_query(dir.path(), id.file_name(), "SELECT 1;");
        }

        let store = QueryStore::load(dir.path()).unwrap();
        assert_eq!(store.loaded_count(), QueryId::ALL.len());
        for id in QueryId::ALL {
            assert_eq!(store.read(id).unwrap(), "SELECT 1;");
        }
    }

    #[test]
    fn test_missing_file_yields_query_not_found_at_read() {
        let dir = tempfile::tempdir().unwrap();
        write_query(dir.path(), QueryId::ForecastedHighs.file_name(), "SELECT 1;");

        let store = QueryStore::load(dir.path()).unwrap();
        assert!(store.read(QueryId::ForecastedHighs).is_ok());

        let err = store.read(QueryId::ObservedHighs).unwrap_err();
        assert!(matches!(err, WeatherError::QueryNotFound(_)));
        assert_eq!(
            err.to_string(),
            "Query file not found: get_observed_highs.sql"
        );
    }

    #[test]
    fn test_non_sql_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        // Same stem, wrong suffix: must not satisfy the lookup.
        write_query(dir.path(), "get_forecasted_highs.txt", "SELECT 1;");
        write_query(dir.path(), "README.md", "not sql");

        let store = QueryStore::load(dir.path()).unwrap();
        assert_eq!(store.loaded_count(), 0);
        assert!(store.read(QueryId::ForecastedHighs).is_err());
    }

    #[test]
    fn test_subdirectories_are_not_recursed() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        write_query(&sub, QueryId::ForecastedHighs.file_name(), "SELECT 1;");

        let store = QueryStore::load(dir.path()).unwrap();
        assert!(store.read(QueryId::ForecastedHighs).is_err());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");
        assert!(QueryStore::load(&gone).is_err());
    }

    #[test]
    fn test_shipped_query_set_is_complete() {
        // The .sql files deployed with the service must cover every id.
        let shipped = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../services/weather-api/sql");
        let store = QueryStore::load(&shipped).unwrap();
        assert_eq!(store.loaded_count(), QueryId::ALL.len());
    }
}
