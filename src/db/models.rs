use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::error::FridgeError;

/// Review state of an item. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ItemStatus {
    Draft,
    Confirmed,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Draft => "draft",
            ItemStatus::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ItemStatus::Draft),
            "confirmed" => Ok(ItemStatus::Confirmed),
            other => Err(format!("unknown item status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// Empty when no display image was resolved.
    pub image_url: String,
    /// Not clamped by the store; callers keep it non-negative.
    pub quantity: i64,
    pub status: ItemStatus,
}

/// Row shape of `recipes`; converted into [`Recipe`] at the storage boundary.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct DbRecipe {
    pub id: i64,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
    pub how_to_cook: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub how_to_cook: Option<String>,
}

/// A recipe that has not been stored yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub how_to_cook: Option<String>,
}

impl From<DbRecipe> for Recipe {
    fn from(row: DbRecipe) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            image_url: row.image_url.filter(|s| !s.is_empty()),
            ingredients: row
                .ingredients
                .as_deref()
                .map(split_ingredients)
                .unwrap_or_default(),
            how_to_cook: row.how_to_cook.filter(|s| !s.is_empty()),
        }
    }
}

/// Separator of the flattened `recipes.ingredients` column.
pub const INGREDIENT_SEPARATOR: char = ',';

impl NewRecipe {
    /// Rejects recipes that would not read back as saved: a blank name, or an
    /// ingredient containing [`INGREDIENT_SEPARATOR`].
    pub fn validate(&self) -> Result<(), FridgeError> {
        if self.name.trim().is_empty() {
            return Err(FridgeError::InvalidRequest(
                "recipe name must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .ingredients
            .iter()
            .find(|i| i.contains(INGREDIENT_SEPARATOR))
        {
            return Err(FridgeError::InvalidRequest(format!(
                "ingredient `{bad}` must not contain `{INGREDIENT_SEPARATOR}`"
            )));
        }
        Ok(())
    }
}

pub(crate) fn join_ingredients(ingredients: &[String]) -> String {
    ingredients.join(", ")
}

pub(crate) fn split_ingredients(stored: &str) -> Vec<String> {
    stored
        .split(INGREDIENT_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
