//! Handler errors and their HTTP representation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::store::StoreError;
use crate::validation::ErrorResult;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("product {0} not found")]
    NotFound(Uuid),

    #[error("request validation failed")]
    Validation(ErrorResult),

    #[error("failed to encode response body: {0}")]
    Encoding(String),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => ApiError::NotFound(id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": self.to_string() }))).into_response()
            }
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::Encoding(ref message) => {
                tracing::error!(error = %message, "response encoding failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
