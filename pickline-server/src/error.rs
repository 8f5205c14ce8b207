//! Error types for the HTTP layer.
//!
//! [`GatewayError`] is what the storage gateway reports; [`ApiError`] is what a
//! handler answers with. Every error body has the shape `{"detail": ...}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pickline::error::DocumentStoreError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::validate::ValidationErrors;

pub const UNAVAILABLE_DETAIL: &str = "Database not available";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// No store connection exists.
    #[error("Database not available")]
    Unavailable,
    #[error("failed to write to {collection}: {source}")]
    Write {
        collection: String,
        #[source]
        source: DocumentStoreError,
    },
    #[error("failed to read from {collection}: {source}")]
    Read {
        collection: String,
        #[source]
        source: DocumentStoreError,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Database not available")]
    Unavailable,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Internal(String),
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unavailable => ApiError::Unavailable,
            GatewayError::Write { .. } => {
                error!(error = %err, "write failed");
                ApiError::Internal("Failed to save".to_string())
            }
            GatewayError::Read { .. } => {
                error!(error = %err, "read failed");
                ApiError::Internal("Failed to load".to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        error!(error = %err, "failed to render document");
        ApiError::Internal("Failed to render document".to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unavailable | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Validation(errors) => {
                warn!(%errors, "rejected request");
                json!({ "detail": errors })
            }
            ApiError::NotFound => json!({ "detail": "Not found" }),
            ApiError::Unavailable => json!({ "detail": UNAVAILABLE_DETAIL }),
            ApiError::Internal(message) => {
                error!(%message, "request failed");
                json!({ "detail": message })
            }
        };

        (status, Json(body)).into_response()
    }
}
