use std::path::PathBuf;
use std::sync::Arc;

use workfinder::catalog::Dataset;
use workfinder::config::{LatencyConfig, ServerConfig};
use workfinder::server::{AppState, api_routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let address =
        std::env::var("WORKFINDER_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());

    let port: u16 = std::env::var("WORKFINDER_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let data_path = PathBuf::from(
        std::env::var("WORKFINDER_DATA").unwrap_or_else(|_| "./data/workers.json".to_string()),
    );

    let latency = match std::env::var("WORKFINDER_LATENCY_MS") {
        Ok(raw) => LatencyConfig::from_env_value(&raw)?,
        Err(_) => LatencyConfig::default(),
    };

    let config = ServerConfig {
        address,
        port,
        data_path,
        latency,
    };

    eprintln!("🔎 Workfinder v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Workers API: http://{}:{}/api/workers", config.address, config.port);
    eprintln!("   Services API: http://{}:{}/api/services", config.address, config.port);
    if config.latency.enabled {
        eprintln!(
            "   Simulated latency: {}-{}ms",
            config.latency.min_ms, config.latency.max_ms
        );
    }

    let dataset = Dataset::from_path(&config.data_path).unwrap_or_else(|e| {
        eprintln!(
            "Error: Failed to load dataset at {}: {}",
            config.data_path.display(),
            e
        );
        std::process::exit(1);
    });

    eprintln!(
        "   Dataset: {} records, {} services\n",
        dataset.len(),
        dataset.services().len()
    );

    let state = AppState {
        dataset: Arc::new(dataset),
        latency: config.latency,
    };
    let app = api_routes(state);

    let listener =
        tokio::net::TcpListener::bind((config.address.as_str(), config.port)).await?;
    tracing::info!(address = %config.address, port = config.port, "HTTP server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
