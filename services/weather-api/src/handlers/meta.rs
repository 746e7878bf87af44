//! Service metadata handlers: root, health, endpoint inventory.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub timestamp: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct EndpointEntry {
    pub endpoint: &'static str,
    pub methods: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct EndpointsResponse {
    pub endpoints: Vec<EndpointEntry>,
}

/// Every route the service exposes. Kept in sync with the router in
/// `lib.rs`; the inventory test cross-checks the set.
pub const ROUTES: [&str; 10] = [
    "/",
    "/health",
    "/endpoints",
    "/forecast/highs",
    "/forecast/providers",
    "/forecast/locations",
    "/observations/highs",
    "/observations/latest",
    "/observations/temperatures/max",
    "/kalshi/balance",
];

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello World from Weather API!".to_string(),
        timestamp: now_iso(),
        status: "running".to_string(),
    })
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "weather-api".to_string(),
        timestamp: now_iso(),
    })
}

/// GET /endpoints - static route inventory
pub async fn endpoints_handler() -> Json<EndpointsResponse> {
    Json(EndpointsResponse {
        endpoints: ROUTES
            .iter()
            .map(|route| EndpointEntry {
                endpoint: route,
                methods: vec!["GET"],
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "weather-api");
    }

    #[tokio::test]
    async fn test_root_handler() {
        let response = root_handler().await;
        assert_eq!(response.status, "running");
    }

    #[tokio::test]
    async fn test_endpoints_handler_lists_every_route() {
        let response = endpoints_handler().await;
        assert_eq!(response.endpoints.len(), ROUTES.len());
        assert!(response
            .endpoints
            .iter()
            .all(|e| e.methods == vec!["GET"]));
    }
}
