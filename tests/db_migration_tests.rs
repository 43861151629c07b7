mod common;

use common::{cleanup, sqlite_url, unique_sqlite_path};
use fridgescan::db::{ItemRepository, ItemStatus};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

#[tokio::test]
async fn legacy_items_table_gains_status_column() {
    let temp_path = unique_sqlite_path("migration");
    let database_url = sqlite_url(&temp_path);

    // A database from before item review existed.
    {
        let opts = SqliteConnectOptions::from_str(&database_url)
            .expect("valid url")
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .expect("legacy connect");
        sqlx::query(
            "CREATE TABLE items (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, image_url TEXT, quantity INTEGER)",
        )
        .execute(&pool)
        .await
        .expect("legacy table");
        sqlx::query("INSERT INTO items (name, image_url, quantity) VALUES ('Old Jam', NULL, 2)")
            .execute(&pool)
            .await
            .expect("legacy row");
        pool.close().await;
    }

    let db = fridgescan::db::spawn(&database_url)
        .await
        .expect("spawn migrates");

    let drafts = db.get_items(ItemStatus::Draft).await;
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].name, "Old Jam");
    assert_eq!(drafts[0].image_url, "");
    assert_eq!(drafts[0].quantity, 2);

    // Initializing an up-to-date database again is harmless.
    let again = fridgescan::db::spawn(&database_url)
        .await
        .expect("re-init is idempotent");
    assert_eq!(again.get_items(ItemStatus::Draft).await.len(), 1);

    cleanup(&temp_path).await;
}
