//! Temporal serialization for JSON responses.
//!
//! Database rows carry `chrono` date and timestamp values; everything
//! that crosses the JSON boundary is rendered in a fixed textual form:
//! dates as `YYYY-MM-DD`, timestamps as `YYYY-MM-DDTHH:MM:SS` with no
//! timezone suffix and no fractional seconds.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serializer;

use crate::error::{WeatherError, WeatherResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Serde serializer for date-typed fields.
pub fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(date))
}

/// Serde serializer for timestamp-typed fields.
pub fn serialize_datetime<S: Serializer>(
    datetime: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_datetime(datetime))
}

/// Serde serializer for optional date fields.
///
/// Pair with `skip_serializing_if = "Option::is_none"`; a populated field
/// serializes as its `YYYY-MM-DD` form, an absent one is skipped entirely.
pub fn serialize_opt_date<S: Serializer>(
    date: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(d) => serializer.serialize_str(&format_date(d)),
        None => serializer.serialize_none(),
    }
}

/// Serde serializer for optional timestamp fields.
pub fn serialize_opt_datetime<S: Serializer>(
    datetime: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match datetime {
        Some(dt) => serializer.serialize_str(&format_datetime(dt)),
        None => serializer.serialize_none(),
    }
}

/// Parse an inbound `YYYY-MM-DD` query parameter.
pub fn parse_date(param: &str, value: &str) -> WeatherResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| WeatherError::InvalidParameter {
        param: param.to_string(),
        message: format!("expected YYYY-MM-DD, got '{}'", value),
    })
}
