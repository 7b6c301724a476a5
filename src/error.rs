//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Request-level errors surfaced by the scoring API.
///
/// Configuration problems (missing scaler artifact, unreadable config
/// file) are startup failures and never reach this type; they abort the
/// process before the listener binds.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or out-of-range client input
    #[error("{0}")]
    Validation(String),

    /// The remote model server could not be reached, returned a
    /// non-success status, or sent back an unreadable body
    #[error("Error calling fraud model: {0}")]
    Inference(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Inference(msg) => {
                tracing::error!("Inference call failed: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
