//! Recipe helpers on top of [`crate::db::RecipeRepository`].

mod seed;
mod suggest;

pub use seed::seed_recipes_from_file;
pub use suggest::{RecipeSuggestion, suggest};
