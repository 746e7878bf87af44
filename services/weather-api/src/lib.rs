//! Weather API service library.
//!
//! Read-only HTTP facade over the weather observations and forecasts
//! store, plus the signed Kalshi balance endpoint.

pub mod config;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the service router.
///
/// Lives in the library so integration tests can drive the full router
/// without binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::meta::root_handler))
        .route("/health", get(handlers::meta::health_handler))
        .route("/endpoints", get(handlers::meta::endpoints_handler))
        // Forecasts
        .route(
            "/forecast/highs",
            get(handlers::forecast::forecast_highs_handler),
        )
        .route(
            "/forecast/providers",
            get(handlers::forecast::providers_handler),
        )
        .route(
            "/forecast/locations",
            get(handlers::forecast::locations_handler),
        )
        // Observations
        .route(
            "/observations/highs",
            get(handlers::observations::observed_highs_handler),
        )
        .route(
            "/observations/latest",
            get(handlers::observations::latest_observation_handler),
        )
        .route(
            "/observations/temperatures/max",
            get(handlers::observations::max_temperatures_handler),
        )
        // Kalshi
        .route("/kalshi/balance", get(handlers::kalshi::balance_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
