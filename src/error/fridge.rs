use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use thiserror::Error as ThisError;

use super::IsRetryable;

#[derive(Debug, ThisError)]
pub enum FridgeError {
    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Vision API key not configured; set providers.vision.api_key")]
    MissingApiKey,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store initialization failed: {0}")]
    StoreInit(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<JsonRejection> for FridgeError {
    fn from(rejection: JsonRejection) -> Self {
        FridgeError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for FridgeError {
    fn from(rejection: QueryRejection) -> Self {
        FridgeError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for FridgeError {
    fn from(rejection: PathRejection) -> Self {
        FridgeError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for FridgeError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            FridgeError::DatabaseError(_)
            | FridgeError::RactorError(_)
            | FridgeError::StoreInit(_)
            | FridgeError::IoError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred.",
            ),

            FridgeError::ReqwestError(_)
            | FridgeError::UpstreamStatus(_)
            | FridgeError::JsonError(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Upstream service error.",
            ),

            FridgeError::MissingApiKey => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MISSING_CREDENTIAL",
                "The vision service is not configured.",
            ),

            FridgeError::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                "The request was not understood.",
            ),

            FridgeError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "The requested record does not exist.",
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
        } else {
            tracing::warn!(error = %self, code, "request rejected");
        }

        let body = ApiErrorBody {
            inner: ApiErrorObject {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}

impl IsRetryable for FridgeError {
    fn is_retryable(&self) -> bool {
        match self {
            FridgeError::ReqwestError(e) => !e.is_builder() && !e.is_decode(),
            FridgeError::UpstreamStatus(status) => status.is_server_error(),
            _ => false,
        }
    }
}
