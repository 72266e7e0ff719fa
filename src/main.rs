//! Air Quality Predictor - Main Entry Point
//!
//! Loads the scaler and model, then serves the prediction form over HTTP.
//! Refuses to start if either artifact cannot be loaded.

use air_quality_predictor::{config::AppConfig, server, AppState, InferenceEngine};
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging; RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!("air_quality_predictor={}", config.logging.level))
    })?;
    if config.logging.is_json() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting Air Quality Predictor");
    info!(
        models_dir = %config.models.models_dir,
        model_file = %config.models.model_file,
        scaler_file = %config.models.scaler_file,
        "Configuration loaded"
    );

    let engine = match InferenceEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "Failed to load model artifacts, refusing to start");
            return Err(e).context("Artifact loading failed");
        }
    };
    info!(model = %engine.model_name(), "Artifacts loaded");

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let state = AppState::new(engine);
    let metrics = state.metrics.clone();

    server::serve(listener, state, shutdown_signal()).await?;

    info!("Server shutting down...");
    metrics.print_summary();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
