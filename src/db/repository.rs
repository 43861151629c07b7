//! Repository contracts over the store.
//!
//! Reads and writes deliberately fail differently: list/get operations feed
//! display and degrade to an empty value (logged), while every mutation
//! reports its failure to the caller.

use async_trait::async_trait;
use tracing::warn;

use crate::db::actor::{DbActorHandle, NewItem};
use crate::db::models::{Item, ItemStatus, NewRecipe, Recipe};
use crate::error::FridgeError;

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Inserts a `draft` item; `image_url` defaults to empty.
    async fn add_item(
        &self,
        name: &str,
        quantity: i64,
        image_url: Option<&str>,
    ) -> Result<i64, FridgeError>;

    /// Items with `status`, oldest first. Empty on failure.
    async fn get_items(&self, status: ItemStatus) -> Vec<Item>;

    /// One item by id. `None` when absent or on failure.
    async fn get_item(&self, id: i64) -> Option<Item>;

    /// Stores `quantity` as given, negative values included.
    async fn update_item_quantity(&self, id: i64, quantity: i64) -> Result<(), FridgeError>;

    async fn update_item_status(&self, id: i64, status: ItemStatus) -> Result<(), FridgeError>;

    /// Confirms every draft, whichever scan produced it. Returns rows changed.
    async fn confirm_all_items(&self) -> Result<u64, FridgeError>;

    /// Deleting an unknown id is not an error.
    async fn delete_item(&self, id: i64) -> Result<(), FridgeError>;
}

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn save_recipe(&self, recipe: &NewRecipe) -> Result<i64, FridgeError>;

    /// All recipes, oldest first. Empty on failure.
    async fn get_recipes(&self) -> Vec<Recipe>;

    async fn delete_recipe(&self, id: i64) -> Result<(), FridgeError>;
}

#[async_trait]
impl ItemRepository for DbActorHandle {
    async fn add_item(
        &self,
        name: &str,
        quantity: i64,
        image_url: Option<&str>,
    ) -> Result<i64, FridgeError> {
        self.insert_item(NewItem {
            name: name.to_string(),
            quantity,
            image_url: image_url.unwrap_or_default().to_string(),
        })
        .await
    }

    async fn get_items(&self, status: ItemStatus) -> Vec<Item> {
        self.list_items(status).await.unwrap_or_else(|e| {
            warn!(status = %status, error = %e, "listing items failed; returning empty list");
            Vec::new()
        })
    }

    async fn get_item(&self, id: i64) -> Option<Item> {
        self.find_item(id).await.unwrap_or_else(|e| {
            warn!(id, error = %e, "fetching item failed");
            None
        })
    }

    async fn update_item_quantity(&self, id: i64, quantity: i64) -> Result<(), FridgeError> {
        self.set_item_quantity(id, quantity).await
    }

    async fn update_item_status(&self, id: i64, status: ItemStatus) -> Result<(), FridgeError> {
        self.set_item_status(id, status).await
    }

    async fn confirm_all_items(&self) -> Result<u64, FridgeError> {
        self.confirm_drafts().await
    }

    async fn delete_item(&self, id: i64) -> Result<(), FridgeError> {
        self.remove_item(id).await
    }
}

#[async_trait]
impl RecipeRepository for DbActorHandle {
    async fn save_recipe(&self, recipe: &NewRecipe) -> Result<i64, FridgeError> {
        self.insert_recipe(recipe.clone()).await
    }

    async fn get_recipes(&self) -> Vec<Recipe> {
        self.list_recipes().await.unwrap_or_else(|e| {
            warn!(error = %e, "listing recipes failed; returning empty list");
            Vec::new()
        })
    }

    async fn delete_recipe(&self, id: i64) -> Result<(), FridgeError> {
        self.remove_recipe(id).await
    }
}
