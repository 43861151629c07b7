use crate::error::{FridgeError, IngestFailure};
use crate::ingest::IngestOutcome;
use crate::providers::ImagePayload;
use crate::server::router::FridgeState;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header::CONTENT_TYPE},
    routing::post,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ScanBody {
    /// Bare base64 or a `data:image/...;base64,` URI.
    pub image: String,
}

/// Wire form of [`IngestOutcome`].
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub status: &'static str,
    pub ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<IngestFailure>,
}

impl From<IngestOutcome> for ScanResponse {
    fn from(outcome: IngestOutcome) -> Self {
        match outcome {
            IngestOutcome::Staged { ids } => Self {
                status: "staged",
                ids,
                notice: None,
                failure: None,
            },
            IngestOutcome::Failed(failure) => Self {
                status: "failed",
                ids: Vec::new(),
                notice: Some(failure.notice()),
                failure: Some(failure),
            },
        }
    }
}

async fn ingest(
    state: &FridgeState,
    image: ImagePayload,
) -> Result<Json<ScanResponse>, FridgeError> {
    if image.is_empty() {
        return Err(FridgeError::InvalidRequest("empty image".to_string()));
    }
    let outcome = state.pipeline.ingest_photo(&image).await;
    Ok(Json(outcome.into()))
}

pub async fn scan_encoded(
    State(state): State<FridgeState>,
    payload: Result<Json<ScanBody>, JsonRejection>,
) -> Result<Json<ScanResponse>, FridgeError> {
    let Json(body) = payload?;
    ingest(&state, ImagePayload::Encoded(body.image)).await
}

/// Raw photo bytes; the `Content-Type` must be an `image/*` type.
pub async fn scan_raw(
    State(state): State<FridgeState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ScanResponse>, FridgeError> {
    let mime = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_ascii_lowercase())
        .filter(|v| v.starts_with("image/"))
        .ok_or_else(|| {
            FridgeError::InvalidRequest("Content-Type must be an image type".to_string())
        })?;

    ingest(
        &state,
        ImagePayload::Bytes {
            data: body.to_vec(),
            mime,
        },
    )
    .await
}

pub fn router() -> Router<FridgeState> {
    Router::new()
        .route("/api/scan", post(scan_encoded))
        .route("/api/scan/raw", post(scan_raw))
}
