//! Draft review and the confirmed inventory.
//!
//! Per item: `draft --confirm--> confirmed`, and either state `--delete-->`
//! gone. Nothing here moves a confirmed item back to draft, even though the
//! repository would allow it.

use std::sync::Arc;

use tracing::info;

use crate::db::{Item, ItemRepository, ItemStatus};
use crate::error::FridgeError;
use crate::ingest::IngestionPipeline;

pub struct StagingWorkflow {
    items: Arc<dyn ItemRepository>,
    pipeline: Arc<IngestionPipeline>,
}

impl StagingWorkflow {
    pub fn new(items: Arc<dyn ItemRepository>, pipeline: Arc<IngestionPipeline>) -> Self {
        Self { items, pipeline }
    }

    /// Items awaiting review.
    pub async fn drafts(&self) -> Vec<Item> {
        self.items.get_items(ItemStatus::Draft).await
    }

    /// Accepted items.
    pub async fn inventory(&self) -> Vec<Item> {
        self.items.get_items(ItemStatus::Confirmed).await
    }

    pub async fn confirm(&self, id: i64) -> Result<(), FridgeError> {
        self.items.update_item_status(id, ItemStatus::Confirmed).await
    }

    /// Confirms every pending draft, not just those from the latest scan.
    pub async fn confirm_all(&self) -> Result<u64, FridgeError> {
        let confirmed = self.items.confirm_all_items().await?;
        info!(confirmed, "staging area confirmed");
        Ok(confirmed)
    }

    /// Removes a draft or an inventory item.
    pub async fn discard(&self, id: i64) -> Result<(), FridgeError> {
        self.items.delete_item(id).await
    }

    /// Sets a quantity, clamped at zero.
    pub async fn set_quantity(&self, id: i64, quantity: i64) -> Result<(), FridgeError> {
        self.items.update_item_quantity(id, quantity.max(0)).await
    }

    /// Stepper-style `+delta`, clamped at zero. Returns the updated item.
    pub async fn adjust_quantity(&self, id: i64, delta: i64) -> Result<Item, FridgeError> {
        let mut item = self
            .items
            .get_item(id)
            .await
            .ok_or_else(|| FridgeError::NotFound(format!("item {id}")))?;

        item.quantity = item.quantity.saturating_add(delta).max(0);
        self.items.update_item_quantity(id, item.quantity).await?;
        Ok(item)
    }

    /// Manual (non-photo) entry: same image lookup + draft insert as a scan.
    pub async fn add_manual(&self, name: &str, quantity: i64) -> Result<i64, FridgeError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FridgeError::InvalidRequest(
                "item name must not be empty".to_string(),
            ));
        }
        self.pipeline.stage_one(name, quantity.max(0)).await
    }
}
