//! Fraud Scoring Service - Main Entry Point
//!
//! Exposes a single scoring endpoint that normalizes transaction
//! features, delegates prediction to a remote inference service and
//! thresholds the returned probability into a fraud decision.

use std::sync::Arc;

use anyhow::{Context, Result};
use fraud_scoring_service::{
    config::{AppConfig, LoggingConfig},
    http::{router, ApiState},
    inference::InferenceClient,
    metrics::{MetricsReporter, ScoringMetrics},
    scaler::FeatureScaler,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    init_tracing(&config.logging)?;

    info!("Starting Fraud Scoring Service");
    info!(
        threshold = config.detection.threshold,
        endpoint = %config.inference.endpoint_url,
        timeout_secs = config.inference.timeout_secs,
        "Configuration loaded"
    );

    // Normalization parameters are required; refuse to serve without them.
    let scaler = FeatureScaler::load(&config.scaler.params_path)
        .context("Failed to load normalization parameters")?;

    let client = InferenceClient::new(&config.inference)?;

    // Initialize metrics and periodic reporter
    let metrics = Arc::new(ScoringMetrics::new());
    let reporter_metrics = metrics.clone();
    tokio::spawn(async move {
        MetricsReporter::new(reporter_metrics, 30).start().await;
    });

    let state = ApiState {
        config: Arc::new(config.clone()),
        scaler: Arc::new(scaler),
        client,
        metrics,
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "Listening for scoring requests");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let directive = format!("fraud_scoring_service={}", logging.level);
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?);

    if logging.format == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    Ok(())
}
