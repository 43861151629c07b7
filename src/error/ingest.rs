use serde::Serialize;
use thiserror::Error as ThisError;

/// Why a photo ingestion produced no usable result.
///
/// Ingestion never hands a `FridgeError` to its caller; it collapses every
/// failure into one of these, each with a generic user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ThisError)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngestFailure {
    /// The vision credential is absent; nothing was sent.
    #[error("vision service credential missing")]
    MissingCredential,

    /// The vision call itself failed (transport or non-success status).
    #[error("vision service failed: {detail}")]
    Vision {
        #[serde(skip)]
        detail: String,
    },

    /// The reply was not a recognizable item list.
    #[error("vision reply could not be parsed: {detail}")]
    Unparseable {
        #[serde(skip)]
        detail: String,
    },

    /// An image lookup or insert failed mid-batch; remaining entries were skipped.
    #[error("batch aborted: {detail}")]
    Batch {
        #[serde(skip)]
        detail: String,
    },
}

impl IngestFailure {
    /// Text suitable for an alert in the client.
    pub fn notice(&self) -> &'static str {
        match self {
            IngestFailure::MissingCredential => "Photo analysis is not configured.",
            IngestFailure::Vision { .. } => "Failed to analyze the photo. Please try again.",
            IngestFailure::Unparseable { .. } => "No items could be recognized in the photo.",
            IngestFailure::Batch { .. } => "Failed to save the detected items.",
        }
    }
}
