//! Fraud Scoring Service Library
//!
//! Normalizes credit-card transaction features and delegates fraud
//! scoring to a remote inference service.

pub mod config;
pub mod error;
pub mod http;
pub mod inference;
pub mod metrics;
pub mod scaler;
pub mod types;

pub use config::AppConfig;
pub use error::{ServiceError, ServiceResult};
pub use http::{router, ApiState};
pub use inference::InferenceClient;
pub use metrics::ScoringMetrics;
pub use scaler::FeatureScaler;
pub use types::{FraudDecision, TransactionInput};
