use std::sync::Arc;

use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::parse::{DetectedItem, parse_vision_reply};
use crate::db::ItemRepository;
use crate::error::{FridgeError, IngestFailure};
use crate::providers::{ImageLookup, ImagePayload, VisionService};
use crate::utils::logging::with_pretty_json_debug;

/// Result of ingesting one photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Every detected item was stored as a draft. May be empty.
    Staged { ids: Vec<i64> },
    /// Nothing usable came out. Rows stored before a mid-batch failure stay
    /// in place but are not reported.
    Failed(IngestFailure),
}

/// Photo → vision reply → parsed items → image lookup → draft rows.
pub struct IngestionPipeline {
    items: Arc<dyn ItemRepository>,
    vision: Arc<dyn VisionService>,
    image_lookup: Arc<dyn ImageLookup>,
}

impl IngestionPipeline {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        vision: Arc<dyn VisionService>,
        image_lookup: Arc<dyn ImageLookup>,
    ) -> Self {
        Self {
            items,
            vision,
            image_lookup,
        }
    }

    /// Ingests one photo. Never returns an error; failures become
    /// [`IngestOutcome::Failed`].
    pub async fn ingest_photo(&self, image: &ImagePayload) -> IngestOutcome {
        let span = info_span!("ingest", scan_id = %Uuid::new_v4());
        self.run(image).instrument(span).await
    }

    async fn run(&self, image: &ImagePayload) -> IngestOutcome {
        let reply = match self.vision.analyze(image).await {
            Ok(reply) => reply,
            Err(FridgeError::MissingApiKey) => {
                warn!("vision credential missing; photo not sent");
                return IngestOutcome::Failed(IngestFailure::MissingCredential);
            }
            Err(e) => {
                error!(error = %e, "vision call failed");
                return IngestOutcome::Failed(IngestFailure::Vision {
                    detail: e.to_string(),
                });
            }
        };

        let detected = match parse_vision_reply(&reply) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    error = %e,
                    reply = %format!("{:.200}", reply),
                    "vision reply is not an item list"
                );
                return IngestOutcome::Failed(IngestFailure::Unparseable {
                    detail: e.to_string(),
                });
            }
        };

        with_pretty_json_debug(&detected, |pretty| {
            debug!(count = detected.len(), items = %pretty, "vision reply parsed");
        });

        match self.stage_all(&detected).await {
            Ok(ids) => {
                info!(staged = ids.len(), "photo ingested");
                IngestOutcome::Staged { ids }
            }
            Err(e) => {
                error!(error = %e, "batch aborted; remaining items skipped");
                IngestOutcome::Failed(IngestFailure::Batch {
                    detail: e.to_string(),
                })
            }
        }
    }

    /// Sequential, stops at the first failure. Not atomic.
    async fn stage_all(&self, detected: &[DetectedItem]) -> Result<Vec<i64>, FridgeError> {
        let mut ids = Vec::with_capacity(detected.len());
        for item in detected {
            ids.push(self.stage_one(&item.name, item.quantity).await?);
        }
        Ok(ids)
    }

    /// Resolves a display image and stores one draft. Shared with manual entry.
    pub async fn stage_one(&self, name: &str, quantity: i64) -> Result<i64, FridgeError> {
        let image_url = self.image_lookup.resolve(name).await?;
        let id = self
            .items
            .add_item(name, quantity, Some(image_url.as_str()))
            .await?;
        debug!(id, name, quantity, image_url = %image_url, "draft staged");
        Ok(id)
    }
}
