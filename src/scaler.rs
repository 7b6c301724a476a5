//! Feature normalization for fraud model inference.
//!
//! Applies the standardization learned by the training pipeline to raw
//! transaction features before they are sent to the model server.
//! Parameters are loaded once at startup and are read-only for the
//! process lifetime.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::types::TransactionInput;

/// Number of features the model was trained on.
pub const FEATURE_COUNT: usize = 5;

/// Feature names in model input order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["distance", "ratio_to_median", "pin", "chip", "online"];

/// Per-feature standardization parameters exported from training.
///
/// Field names follow the sklearn StandardScaler attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Standardizes raw transaction features with precomputed center and
/// scale values.
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl FeatureScaler {
    /// Build a scaler from parameters, validating feature arity.
    pub fn from_params(params: ScalerParams) -> Result<Self> {
        if params.mean.len() != FEATURE_COUNT || params.scale.len() != FEATURE_COUNT {
            bail!(
                "scaler params must cover {} features, got mean={} scale={}",
                FEATURE_COUNT,
                params.mean.len(),
                params.scale.len()
            );
        }
        if let Some(i) = params.scale.iter().position(|&s| s == 0.0) {
            bail!("scale for feature '{}' is zero", FEATURE_NAMES[i]);
        }

        let mut mean = [0.0; FEATURE_COUNT];
        let mut scale = [0.0; FEATURE_COUNT];
        mean.copy_from_slice(&params.mean);
        scale.copy_from_slice(&params.scale);

        Ok(Self { mean, scale })
    }

    /// Load scaler parameters from a JSON artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler params from {}", path.display()))?;
        let params: ScalerParams = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scaler params from {}", path.display()))?;

        let scaler = Self::from_params(params)?;
        info!(
            path = %path.display(),
            features = FEATURE_COUNT,
            "Scaler parameters loaded"
        );

        Ok(scaler)
    }

    /// Standardize a transaction into the model's input vector.
    ///
    /// Output order matches `FEATURE_NAMES`. Pure function of the input
    /// and the loaded parameters.
    pub fn transform(&self, tx: &TransactionInput) -> [f64; FEATURE_COUNT] {
        let raw = tx.raw_features();
        let mut normalized = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            normalized[i] = (raw[i] - self.mean[i]) / self.scale[i];
        }
        normalized
    }

    /// Number of features produced by `transform`.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }
}
