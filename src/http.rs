//! HTTP transport shell for the fraud scoring service.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::ServiceResult;
use crate::inference::InferenceClient;
use crate::metrics::ScoringMetrics;
use crate::scaler::FeatureScaler;
use crate::types::{FraudDecision, TransactionInput};

/// Shared request-handling state, read-only after startup.
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<AppConfig>,
    pub scaler: Arc<FeatureScaler>,
    pub client: InferenceClient,
    pub metrics: Arc<ScoringMetrics>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct WelcomeResponse {
    message: &'static str,
}

/// Build the service router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", get(predict))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Score a transaction: validate, normalize, call the model server,
/// threshold.
async fn predict(
    State(state): State<ApiState>,
    Query(input): Query<TransactionInput>,
) -> ServiceResult<Json<FraudDecision>> {
    input.validate()?;

    let normalized = state.scaler.transform(&input);

    let started = Instant::now();
    let probability = match state.client.score(&normalized).await {
        Ok(probability) => probability,
        Err(e) => {
            state.metrics.record_failure();
            return Err(e);
        }
    };

    let decision = FraudDecision::from_probability(probability, state.config.detection.threshold);
    state
        .metrics
        .record_score(started.elapsed(), probability, decision.is_fraud);

    debug!(
        probability,
        is_fraud = decision.is_fraud,
        "Transaction scored"
    );

    Ok(Json(decision))
}

/// Static health check, no dependency probing.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the fraud scoring service. Query /predict to score a transaction.",
    })
}
