//! Mapping of request failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use engine::RecommendError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Body is absent, not JSON, or has no string `district`
    #[error("No district provided")]
    MissingRequestField,

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingRequestField => StatusCode::BAD_REQUEST,
            ApiError::Recommend(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Recommend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!("Prediction failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
