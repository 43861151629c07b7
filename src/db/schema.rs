//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `items` table (scanned or manually entered food, `draft` until confirmed)
/// - `recipes` table (saved or seeded recipes, ingredients flattened to text)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Inventory items
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    image_url TEXT,
    quantity INTEGER,
    status TEXT DEFAULT 'draft'
);

-- ---------------------------------------------------------------------------
-- Recipes (ingredients stored as ", "-joined text)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    image_url TEXT,
    ingredients TEXT,
    how_to_cook TEXT
);
"#;

/// Databases created before item review existed lack `items.status`.
///
/// Re-running this on an up-to-date database fails with "duplicate column";
/// that failure is expected and ignored.
pub const ITEMS_STATUS_MIGRATION: &str =
    "ALTER TABLE items ADD COLUMN status TEXT DEFAULT 'draft'";
