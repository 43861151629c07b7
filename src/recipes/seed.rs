use std::path::Path;

use tracing::info;

use crate::db::{NewRecipe, RecipeRepository};
use crate::error::FridgeError;

/// Saves the recipes in `path` (a JSON array) if the store has none yet.
///
/// Returns how many were saved; `0` when the table was already populated.
pub async fn seed_recipes_from_file(
    recipes: &dyn RecipeRepository,
    path: &Path,
) -> Result<usize, FridgeError> {
    if !recipes.get_recipes().await.is_empty() {
        info!(path = %path.display(), "recipes present; seed skipped");
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path).await?;
    let seeds: Vec<NewRecipe> = serde_json::from_str(&raw)?;

    for recipe in &seeds {
        recipes.save_recipe(recipe).await?;
    }

    info!(path = %path.display(), count = seeds.len(), "recipes seeded");
    Ok(seeds.len())
}
