//! In-memory SQLite pools with the stock schema, for repository and
//! service tests.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Create an in-memory SQLite pool with the stock schema applied.
///
/// Single connection: each `sqlite::memory:` connection gets its own
/// database, so the pool must never open a second one.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE menu_item (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            inventory_type TEXT NOT NULL DEFAULT 'TRACKED'
                CHECK (inventory_type IN ('TRACKED', 'UNLIMITED')),
            stock_quantity INTEGER CHECK (stock_quantity >= 0),
            initial_stock INTEGER CHECK (initial_stock >= 0),
            low_stock_alert INTEGER CHECK (low_stock_alert >= 0),
            is_available INTEGER NOT NULL DEFAULT 1,
            auto_mark_unavailable INTEGER NOT NULL DEFAULT 1,
            version INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER NOT NULL DEFAULT 0
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE stock_adjustment (
            id INTEGER PRIMARY KEY,
            menu_item_id INTEGER NOT NULL REFERENCES menu_item (id),
            adjustment_type TEXT NOT NULL
                CHECK (adjustment_type IN ('DAILY_RESET', 'MANUAL_ADD', 'MANUAL_REMOVE')),
            previous_stock INTEGER NOT NULL,
            new_stock INTEGER NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity >= 0),
            reason TEXT,
            user_id TEXT,
            created_at INTEGER NOT NULL DEFAULT 0
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE INDEX idx_stock_adjustment_item_created
            ON stock_adjustment (menu_item_id, created_at DESC)",
    )
    .execute(&pool)
    .await
    .unwrap();

    pool
}
