//! Database module: models, schema and repositories for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the single actor that owns the pool and runs every statement
//! - `repository.rs`: item/recipe contracts implemented by the actor handle

pub mod actor;
pub mod models;
pub mod repository;
pub mod schema;

pub use actor::{DbActorHandle, NewItem, spawn};
pub use models::{Item, ItemStatus, NewRecipe, Recipe};
pub use repository::{ItemRepository, RecipeRepository};
pub use schema::SQLITE_INIT;
