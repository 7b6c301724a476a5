//! Remote inference client for the fraud model.
//!
//! Speaks the Open Inference Protocol (KServe v2): the normalized
//! feature vector goes out as a single FP32 tensor of shape [1, 5] and
//! the fraud probability comes back as the first element of the first
//! output.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::InferenceConfig;
use crate::error::ServiceError;
use crate::scaler::FEATURE_COUNT;

/// Input tensor name the model was exported with.
const INPUT_TENSOR_NAME: &str = "dense_input";

#[derive(Debug, Serialize)]
struct InferInput {
    name: &'static str,
    shape: [usize; 2],
    datatype: &'static str,
    data: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct InferRequest {
    inputs: Vec<InferInput>,
}

impl InferRequest {
    fn for_features(features: &[f64; FEATURE_COUNT]) -> Self {
        Self {
            inputs: vec![InferInput {
                name: INPUT_TENSOR_NAME,
                shape: [1, FEATURE_COUNT],
                datatype: "FP32",
                data: features.iter().map(|&v| v as f32).collect(),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct InferOutput {
    data: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct InferResponse {
    outputs: Vec<InferOutput>,
}

impl InferResponse {
    /// First output's first data element, the fraud probability.
    fn probability(&self) -> Option<f64> {
        self.outputs.first().and_then(|output| output.data.first()).copied()
    }
}

/// Client for the remote model server.
///
/// One outbound call per scored transaction; no retry, no caching.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint_url: String,
}

impl InferenceClient {
    /// Build a client for the configured endpoint with an explicit
    /// request timeout.
    pub fn new(config: &InferenceConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint_url: config.endpoint_url.clone(),
        })
    }

    /// Score a normalized feature vector.
    ///
    /// Network failures, non-2xx statuses and malformed bodies all
    /// surface as `ServiceError::Inference` with the underlying reason.
    pub async fn score(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64, ServiceError> {
        let request = InferRequest::for_features(features);

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::Inference(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Inference(format!(
                "model server returned {}",
                status
            )));
        }

        let body: InferResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Inference(e.to_string()))?;

        let probability = body.probability().ok_or_else(|| {
            ServiceError::Inference("model response contained no output data".to_string())
        })?;

        debug!(probability, "Fraud model scored transaction");

        Ok(probability)
    }

    /// Configured endpoint URL.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}
