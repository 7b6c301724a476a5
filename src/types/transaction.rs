//! Transaction input and fraud decision types

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::scaler::FEATURE_COUNT;

/// A credit-card transaction to be scored for fraud risk.
///
/// Constructed once per request from query parameters and discarded
/// after the response is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Distance from the last transaction location, in km
    pub distance: f64,

    /// Ratio of the transaction amount to the median amount
    pub ratio_to_median: f64,

    /// PIN used (1) or not (0)
    pub pin: i8,

    /// Chip used (1) or not (0)
    pub chip: i8,

    /// Online transaction (1) or not (0)
    pub online: i8,
}

impl TransactionInput {
    /// Reject flag values other than 0 or 1 before any scoring work.
    pub fn validate(&self) -> Result<(), ServiceError> {
        for (name, value) in [
            ("pin", self.pin),
            ("chip", self.chip),
            ("online", self.online),
        ] {
            if !(0..=1).contains(&value) {
                return Err(ServiceError::Validation(format!(
                    "{} must be 0 or 1, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Raw feature vector in model input order, flags coerced to 0.0/1.0.
    pub fn raw_features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.distance,
            self.ratio_to_median,
            f64::from(self.pin),
            f64::from(self.chip),
            f64::from(self.online),
        ]
    }
}

/// Scoring verdict returned to the caller. Never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudDecision {
    /// Whether the transaction is classified as fraudulent
    pub is_fraud: bool,

    /// Raw probability reported by the model, unmodified
    pub fraud_probability: f64,
}

impl FraudDecision {
    /// Classify a probability against the configured threshold.
    ///
    /// The comparison is strictly greater-than: a probability exactly
    /// at the threshold is not flagged.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        Self {
            is_fraud: probability > threshold,
            fraud_probability: probability,
        }
    }
}
