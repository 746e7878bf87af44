//! Error types for the weather-api services.

use thiserror::Error;

/// Result type alias using WeatherError.
pub type WeatherResult<T> = Result<T, WeatherError>;

/// Primary error type for query-dispatch operations.
///
/// Display strings are the client-facing messages; handlers serialize
/// them verbatim into `{"error": "..."}` bodies.
#[derive(Debug, Error)]
pub enum WeatherError {
    // === Request validation errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter {param}: {message}")]
    InvalidParameter { param: String, message: String },

    // === Data access errors ===
    /// A named query file was absent from the loaded set. This is a
    /// configuration-shape error, not a connectivity failure.
    #[error("Query file not found: {0}")]
    QueryNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl WeatherError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WeatherError::MissingParameter(_) | WeatherError::InvalidParameter { .. } => 400,
            WeatherError::QueryNotFound(_) | WeatherError::DatabaseError(_) => 500,
        }
    }
}

impl From<std::io::Error> for WeatherError {
    fn from(err: std::io::Error) -> Self {
        WeatherError::DatabaseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message_names_parameter() {
        let err = WeatherError::MissingParameter("station_id".to_string());
        assert_eq!(err.to_string(), "Missing required parameter: station_id");
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_query_not_found_message() {
        let err = WeatherError::QueryNotFound("get_forecasted_highs.sql".to_string());
        assert!(err.to_string().starts_with("Query file not found:"));
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn test_database_error_carries_driver_message() {
        let err = WeatherError::DatabaseError("connection refused".to_string());
        assert_eq!(err.to_string(), "Database error: connection refused");
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn test_invalid_parameter_status() {
        let err = WeatherError::InvalidParameter {
            param: "start".to_string(),
            message: "expected YYYY-MM-DD".to_string(),
        };
        assert_eq!(err.http_status_code(), 400);
        assert!(err.to_string().contains("start"));
    }
}
