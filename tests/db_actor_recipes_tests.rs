mod common;

use common::{cleanup, sqlite_url, unique_sqlite_path};
use fridgescan::db::{NewRecipe, RecipeRepository};
use fridgescan::error::FridgeError;

#[tokio::test]
async fn recipes_round_trip_through_the_store() {
    let temp_path = unique_sqlite_path("recipes");
    let database_url = sqlite_url(&temp_path);
    let db = fridgescan::db::spawn(&database_url)
        .await
        .expect("db spawn");

    assert!(db.get_recipes().await.is_empty());

    let omelette = db
        .save_recipe(&NewRecipe {
            name: "Omelette".to_string(),
            image_url: Some("http://img.test/omelette.png".to_string()),
            ingredients: vec!["2 eggs".to_string(), "milk".to_string(), "salt".to_string()],
            how_to_cook: Some("Whisk and fry.".to_string()),
        })
        .await
        .expect("save omelette");
    let toast = db
        .save_recipe(&NewRecipe {
            name: "Toast".to_string(),
            image_url: None,
            ingredients: vec![],
            how_to_cook: None,
        })
        .await
        .expect("save toast");
    assert!(toast > omelette);

    let recipes = db.get_recipes().await;
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].name, "Omelette");
    assert_eq!(recipes[0].ingredients, vec!["2 eggs", "milk", "salt"]);
    assert_eq!(recipes[0].how_to_cook.as_deref(), Some("Whisk and fry."));
    assert!(recipes[1].ingredients.is_empty());
    assert!(recipes[1].image_url.is_none());

    db.delete_recipe(omelette).await.expect("delete");
    db.delete_recipe(omelette).await.expect("delete again");
    let recipes = db.get_recipes().await;
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, toast);

    cleanup(&temp_path).await;
}

#[tokio::test]
async fn ingredient_containing_separator_is_not_stored() {
    let temp_path = unique_sqlite_path("recipes-separator");
    let database_url = sqlite_url(&temp_path);
    let db = fridgescan::db::spawn(&database_url)
        .await
        .expect("db spawn");

    let err = db
        .save_recipe(&NewRecipe {
            name: "Soup".to_string(),
            image_url: None,
            ingredients: vec!["water".to_string(), "salt, to taste".to_string()],
            how_to_cook: None,
        })
        .await
        .expect_err("comma in ingredient");
    assert!(matches!(err, FridgeError::InvalidRequest(_)));
    assert!(db.get_recipes().await.is_empty());

    cleanup(&temp_path).await;
}
