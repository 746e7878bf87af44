//! Data access for the weather-api service.
//!
//! Provides the named-query store and the PostgreSQL data access layer
//! built on top of it.

pub mod db;
pub mod queries;

pub use db::{ForecastedHigh, Observation, WeatherDb};
pub use queries::{QueryId, QueryStore};
