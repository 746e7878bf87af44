//! Application state for the weather API.

use std::path::Path;

use anyhow::{Context, Result};

use kalshi_client::KalshiClient;
use storage::WeatherDb;

use crate::config::AppConfig;

/// Shared application state.
pub struct AppState {
    /// Pooled database access with the loaded query set.
    pub db: WeatherDb,

    /// Client for signed requests to the Kalshi API.
    pub kalshi: KalshiClient,
}

impl AppState {
    /// Create a new AppState, connecting to the database.
    ///
    /// Database credentials come from `POSTGRES_USER` /
    /// `POSTGRES_PASSWORD`; an authentication failure surfaces as a
    /// request-time database error, not here.
    pub async fn new(config: &AppConfig, sql_dir: &Path) -> Result<Self> {
        let url = database_url(config);

        let db = WeatherDb::connect(&url, sql_dir)
            .await
            .context("Failed to initialize database access")?;

        let kalshi = KalshiClient::new(config.kalshi.base_url.clone())
            .map_err(|e| anyhow::anyhow!("Failed to build Kalshi client: {}", e))?;

        Ok(Self { db, kalshi })
    }

    /// Like [`new`](Self::new) but the pool connects on first use, so no
    /// database needs to be reachable at construction.
    pub fn new_lazy(config: &AppConfig, sql_dir: &Path) -> Result<Self> {
        let url = database_url(config);

        let db = WeatherDb::connect_lazy(&url, sql_dir)
            .map_err(|e| anyhow::anyhow!("Failed to initialize database access: {}", e))?;

        let kalshi = KalshiClient::new(config.kalshi.base_url.clone())
            .map_err(|e| anyhow::anyhow!("Failed to build Kalshi client: {}", e))?;

        Ok(Self { db, kalshi })
    }
}

fn database_url(config: &AppConfig) -> String {
    let user = std::env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = std::env::var("POSTGRES_PASSWORD").unwrap_or_default();
    config.database.connection_url(&user, &password)
}
