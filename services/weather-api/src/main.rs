//! Weather API Server
//!
//! Read-only HTTP facade over the weather observations and forecasts
//! store, with a signed Kalshi balance endpoint.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use weather_api::config::AppConfig;
use weather_api::state::AppState;

/// Weather API Server
#[derive(Parser, Debug)]
#[command(name = "weather-api")]
#[command(about = "Read-only HTTP facade over weather observations and forecasts")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "WEATHER_LISTEN_ADDR")]
    listen: String,

    /// Path to the YAML configuration file
    #[arg(long, default_value = "config/weather-api.yaml", env = "WEATHER_CONFIG")]
    config: PathBuf,

    /// Directory of named .sql query files
    #[arg(long, default_value = "sql", env = "WEATHER_SQL_DIR")]
    sql_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "WEATHER_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .expect("Failed to create Tokio runtime");

    runtime.block_on(async move {
        run_server(args).await;
    });
}

async fn run_server(args: Args) {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting weather API server");

    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize application state
    let state = match AppState::new(&config, &args.sql_dir).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application state: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = weather_api::app(state);

    // Parse listen address
    let addr: SocketAddr = args.listen.parse().expect("Invalid listen address");

    info!("Weather API listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server failed");
}
