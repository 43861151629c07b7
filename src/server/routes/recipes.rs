use super::Created;
use crate::db::{NewRecipe, Recipe};
use crate::error::FridgeError;
use crate::recipes::{RecipeSuggestion, suggest};
use crate::server::router::FridgeState;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{delete, get},
};

pub async fn list_recipes(State(state): State<FridgeState>) -> Json<Vec<Recipe>> {
    Json(state.recipes.get_recipes().await)
}

pub async fn save_recipe(
    State(state): State<FridgeState>,
    payload: Result<Json<NewRecipe>, JsonRejection>,
) -> Result<Json<Created>, FridgeError> {
    let Json(recipe) = payload?;
    recipe.validate()?;
    let id = state.recipes.save_recipe(&recipe).await?;
    Ok(Json(Created { id }))
}

pub async fn delete_recipe(
    State(state): State<FridgeState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, FridgeError> {
    let Path(id) = id?;
    state.recipes.delete_recipe(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Recipes ranked against confirmed inventory.
pub async fn recipe_suggestions(State(state): State<FridgeState>) -> Json<Vec<RecipeSuggestion>> {
    let inventory = state.staging.inventory().await;
    let recipes = state.recipes.get_recipes().await;
    Json(suggest(recipes, &inventory))
}

pub fn router() -> Router<FridgeState> {
    Router::new()
        .route("/api/recipes", get(list_recipes).post(save_recipe))
        .route("/api/recipes/suggestions", get(recipe_suggestions))
        .route("/api/recipes/{id}", delete(delete_recipe))
}
