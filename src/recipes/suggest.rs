use serde::Serialize;

use crate::db::{Item, Recipe};

/// A recipe annotated against the current inventory.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecipeSuggestion {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Ingredients covered by some inventory item.
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Ranks recipes by how many of their ingredients the inventory covers.
///
/// An ingredient is covered when it and an item name contain one another,
/// ignoring case ("2 eggs" is covered by "Egg"). Items with zero quantity do
/// not count. Ties keep id order.
pub fn suggest(recipes: Vec<Recipe>, inventory: &[Item]) -> Vec<RecipeSuggestion> {
    let on_hand: Vec<String> = inventory
        .iter()
        .filter(|item| item.quantity > 0)
        .map(|item| item.name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut suggestions: Vec<RecipeSuggestion> = recipes
        .into_iter()
        .map(|recipe| {
            let (matched, missing): (Vec<String>, Vec<String>) = recipe
                .ingredients
                .iter()
                .cloned()
                .partition(|ingredient| covered(ingredient, &on_hand));
            RecipeSuggestion {
                recipe,
                matched,
                missing,
            }
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.matched
            .len()
            .cmp(&a.matched.len())
            .then(a.recipe.id.cmp(&b.recipe.id))
    });
    suggestions
}

fn covered(ingredient: &str, on_hand: &[String]) -> bool {
    let ingredient = ingredient.to_lowercase();
    on_hand
        .iter()
        .any(|name| ingredient.contains(name.as_str()) || name.contains(ingredient.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ItemStatus;

    fn recipe(id: i64, name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            image_url: None,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            how_to_cook: None,
        }
    }

    fn item(name: &str, quantity: i64) -> Item {
        Item {
            id: 0,
            name: name.to_string(),
            image_url: String::new(),
            quantity,
            status: ItemStatus::Confirmed,
        }
    }

    #[test]
    fn best_covered_recipe_comes_first() {
        let recipes = vec![
            recipe(1, "Toast", &["bread", "butter"]),
            recipe(2, "Omelette", &["2 eggs", "milk", "salt"]),
        ];
        let inventory = [item("Egg", 6), item("Milk", 1), item("Bread", 1)];

        let out = suggest(recipes, &inventory);
        assert_eq!(out[0].recipe.name, "Omelette");
        assert_eq!(out[0].matched, vec!["2 eggs", "milk"]);
        assert_eq!(out[0].missing, vec!["salt"]);
        assert_eq!(out[1].matched, vec!["bread"]);
    }

    #[test]
    fn empty_stock_does_not_count() {
        let out = suggest(vec![recipe(1, "Toast", &["bread"])], &[item("bread", 0)]);
        assert!(out[0].matched.is_empty());
        assert_eq!(out[0].missing, vec!["bread"]);
    }

    #[test]
    fn ties_keep_id_order() {
        let out = suggest(
            vec![recipe(2, "B", &["rice"]), recipe(1, "A", &["rice"])],
            &[],
        );
        assert_eq!(out[0].recipe.id, 1);
        assert_eq!(out[1].recipe.id, 2);
    }

    #[test]
    fn suggestion_serializes_flat() {
        let out = suggest(vec![recipe(3, "Soup", &["leek"])], &[item("Leek", 2)]);
        let value = serde_json::to_value(&out[0]).expect("serialize");
        assert_eq!(value["id"], 3);
        assert_eq!(value["name"], "Soup");
        assert_eq!(value["matched"][0], "leek");
    }
}
