use crate::db::models::{DbRecipe, Item, ItemStatus, NewRecipe, Recipe, join_ingredients};
use crate::db::schema::{ITEMS_STATUS_MIGRATION, SQLITE_INIT};
use crate::error::FridgeError;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert a `draft` item and return its id.
    AddItem(NewItem, RpcReplyPort<Result<i64, FridgeError>>),

    /// List items with the given status, in id order.
    ListItems(ItemStatus, RpcReplyPort<Result<Vec<Item>, FridgeError>>),

    /// Get one item by id.
    GetItem(i64, RpcReplyPort<Result<Option<Item>, FridgeError>>),

    /// Overwrite an item's quantity.
    UpdateItemQuantity(i64, i64, RpcReplyPort<Result<(), FridgeError>>),

    /// Overwrite an item's status.
    UpdateItemStatus(i64, ItemStatus, RpcReplyPort<Result<(), FridgeError>>),

    /// Flip every draft to confirmed; replies with the number of rows touched.
    ConfirmAllItems(RpcReplyPort<Result<u64, FridgeError>>),

    /// Remove an item (no-op if absent).
    DeleteItem(i64, RpcReplyPort<Result<(), FridgeError>>),

    /// Insert a recipe and return its id.
    SaveRecipe(NewRecipe, RpcReplyPort<Result<i64, FridgeError>>),

    /// List all recipes, in id order.
    ListRecipes(RpcReplyPort<Result<Vec<Recipe>, FridgeError>>),

    /// Remove a recipe (no-op if absent).
    DeleteRecipe(i64, RpcReplyPort<Result<(), FridgeError>>),
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub quantity: i64,
    pub image_url: String,
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn insert_item(&self, item: NewItem) -> Result<i64, FridgeError> {
        ractor::call!(self.actor, DbActorMessage::AddItem, item)
            .map_err(|e| FridgeError::RactorError(format!("DbActor AddItem RPC failed: {e}")))?
    }

    pub async fn list_items(&self, status: ItemStatus) -> Result<Vec<Item>, FridgeError> {
        ractor::call!(self.actor, DbActorMessage::ListItems, status)
            .map_err(|e| FridgeError::RactorError(format!("DbActor ListItems RPC failed: {e}")))?
    }

    pub async fn find_item(&self, id: i64) -> Result<Option<Item>, FridgeError> {
        ractor::call!(self.actor, DbActorMessage::GetItem, id)
            .map_err(|e| FridgeError::RactorError(format!("DbActor GetItem RPC failed: {e}")))?
    }

    pub async fn set_item_quantity(&self, id: i64, quantity: i64) -> Result<(), FridgeError> {
        ractor::call!(self.actor, DbActorMessage::UpdateItemQuantity, id, quantity).map_err(
            |e| FridgeError::RactorError(format!("DbActor UpdateItemQuantity RPC failed: {e}")),
        )?
    }

    pub async fn set_item_status(&self, id: i64, status: ItemStatus) -> Result<(), FridgeError> {
        ractor::call!(self.actor, DbActorMessage::UpdateItemStatus, id, status).map_err(|e| {
            FridgeError::RactorError(format!("DbActor UpdateItemStatus RPC failed: {e}"))
        })?
    }

    pub async fn confirm_drafts(&self) -> Result<u64, FridgeError> {
        ractor::call!(self.actor, DbActorMessage::ConfirmAllItems).map_err(|e| {
            FridgeError::RactorError(format!("DbActor ConfirmAllItems RPC failed: {e}"))
        })?
    }

    pub async fn remove_item(&self, id: i64) -> Result<(), FridgeError> {
        ractor::call!(self.actor, DbActorMessage::DeleteItem, id)
            .map_err(|e| FridgeError::RactorError(format!("DbActor DeleteItem RPC failed: {e}")))?
    }

    pub async fn insert_recipe(&self, recipe: NewRecipe) -> Result<i64, FridgeError> {
        ractor::call!(self.actor, DbActorMessage::SaveRecipe, recipe)
            .map_err(|e| FridgeError::RactorError(format!("DbActor SaveRecipe RPC failed: {e}")))?
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, FridgeError> {
        ractor::call!(self.actor, DbActorMessage::ListRecipes).map_err(|e| {
            FridgeError::RactorError(format!("DbActor ListRecipes RPC failed: {e}"))
        })?
    }

    pub async fn remove_recipe(&self, id: i64) -> Result<(), FridgeError> {
        ractor::call!(self.actor, DbActorMessage::DeleteRecipe, id).map_err(|e| {
            FridgeError::RactorError(format!("DbActor DeleteRecipe RPC failed: {e}"))
        })?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let in_memory = is_in_memory(&database_url);

        let mut connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        // Each pooled connection to `:memory:` is its own database, so pin one
        // connection and never recycle it.
        let pool_opts = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            connect_opts = connect_opts
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
            SqlitePoolOptions::new()
        };

        let pool = pool_opts
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        initialize(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!(in_memory, "DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::AddItem(item, reply) => {
                let res = self.add_item(&state.pool, item).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListItems(status, reply) => {
                let res = self.list_items(&state.pool, status).await;
                let _ = reply.send(res);
            }
            DbActorMessage::GetItem(id, reply) => {
                let res = self.get_item(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::UpdateItemQuantity(id, quantity, reply) => {
                let res = self.update_item_quantity(&state.pool, id, quantity).await;
                let _ = reply.send(res);
            }
            DbActorMessage::UpdateItemStatus(id, status, reply) => {
                let res = self.update_item_status(&state.pool, id, status).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ConfirmAllItems(reply) => {
                let res = self.confirm_all_items(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteItem(id, reply) => {
                let res = self.delete_item(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::SaveRecipe(recipe, reply) => {
                let res = self.save_recipe(&state.pool, recipe).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListRecipes(reply) => {
                let res = self.list_recipes(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteRecipe(id, reply) => {
                let res = self.delete_recipe(&state.pool, id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn add_item(&self, pool: &SqlitePool, item: NewItem) -> Result<i64, FridgeError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO items (name, quantity, image_url, status)
            VALUES (?, ?, ?, 'draft')
            RETURNING id
            "#,
        )
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.image_url)
        .fetch_one(pool)
        .await?;

        debug!(id, name = %item.name, quantity = item.quantity, "item added as draft");
        Ok(id)
    }

    async fn list_items(
        &self,
        pool: &SqlitePool,
        status: ItemStatus,
    ) -> Result<Vec<Item>, FridgeError> {
        let rows = sqlx::query_as::<_, Item>(
            r#"
            SELECT id,
                   COALESCE(name, '') AS name,
                   COALESCE(image_url, '') AS image_url,
                   COALESCE(quantity, 0) AS quantity,
                   COALESCE(status, 'draft') AS status
            FROM items
            WHERE COALESCE(status, 'draft') = ?
            ORDER BY id
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn get_item(&self, pool: &SqlitePool, id: i64) -> Result<Option<Item>, FridgeError> {
        let row = sqlx::query_as::<_, Item>(
            r#"
            SELECT id,
                   COALESCE(name, '') AS name,
                   COALESCE(image_url, '') AS image_url,
                   COALESCE(quantity, 0) AS quantity,
                   COALESCE(status, 'draft') AS status
            FROM items
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn update_item_quantity(
        &self,
        pool: &SqlitePool,
        id: i64,
        quantity: i64,
    ) -> Result<(), FridgeError> {
        let res = sqlx::query("UPDATE items SET quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(id)
            .execute(pool)
            .await?;

        debug!(id, quantity, affected = res.rows_affected(), "item quantity updated");
        Ok(())
    }

    async fn update_item_status(
        &self,
        pool: &SqlitePool,
        id: i64,
        status: ItemStatus,
    ) -> Result<(), FridgeError> {
        let res = sqlx::query("UPDATE items SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await?;

        debug!(id, status = %status, affected = res.rows_affected(), "item status updated");
        Ok(())
    }

    async fn confirm_all_items(&self, pool: &SqlitePool) -> Result<u64, FridgeError> {
        let res = sqlx::query("UPDATE items SET status = 'confirmed' WHERE status = 'draft'")
            .execute(pool)
            .await?;

        let affected = res.rows_affected();
        info!(affected, "all draft items confirmed");
        Ok(affected)
    }

    async fn delete_item(&self, pool: &SqlitePool, id: i64) -> Result<(), FridgeError> {
        let res = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        debug!(id, affected = res.rows_affected(), "item deleted");
        Ok(())
    }

    async fn save_recipe(&self, pool: &SqlitePool, recipe: NewRecipe) -> Result<i64, FridgeError> {
        recipe.validate()?;
        let ingredients = join_ingredients(&recipe.ingredients);

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO recipes (name, image_url, ingredients, how_to_cook)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&recipe.name)
        .bind(&recipe.image_url)
        .bind(ingredients)
        .bind(&recipe.how_to_cook)
        .fetch_one(pool)
        .await?;

        info!(id, name = %recipe.name, "recipe saved");
        Ok(id)
    }

    async fn list_recipes(&self, pool: &SqlitePool) -> Result<Vec<Recipe>, FridgeError> {
        let rows = sqlx::query_as::<_, DbRecipe>(
            r#"
            SELECT id, name, image_url, ingredients, how_to_cook
            FROM recipes
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn delete_recipe(&self, pool: &SqlitePool, id: i64) -> Result<(), FridgeError> {
        let res = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        debug!(id, affected = res.rows_affected(), "recipe deleted");
        Ok(())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Spawn the database actor and return a cloneable handle.
///
/// Connection or schema failures surface as [`FridgeError::StoreInit`]; callers
/// are expected to abort startup.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, FridgeError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| FridgeError::StoreInit(e.to_string()))?;

    Ok(DbActorHandle { actor })
}

/// Creates tables if absent, then migrates forward older databases.
async fn initialize(pool: &SqlitePool) -> Result<(), FridgeError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }

    match sqlx::query(ITEMS_STATUS_MIGRATION).execute(pool).await {
        Ok(_) => info!("items.status column added to existing database"),
        Err(e) if is_duplicate_column(&e) => {
            debug!("items.status column already present");
        }
        Err(e) => warn!(error = %e, "items.status migration skipped"),
    }
    Ok(())
}

fn is_duplicate_column(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.message().contains("duplicate column"))
}
