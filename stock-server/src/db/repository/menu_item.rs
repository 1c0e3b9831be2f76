//! Menu Item Repository (stock ledger store)
//!
//! All stock writes go through [`commit_stock_mutation`], which updates the
//! item row and appends the ledger entry in one transaction, guarded by the
//! row's `version` column so concurrent mutations of the same item
//! serialize instead of losing updates.

use super::{RepoError, RepoResult, stock_adjustment};
use super::stock_adjustment::AdjustmentDraft;
use shared::models::{InventoryType, InventoryTypeUpdate, MenuItem, MenuItemCreate, StockAdjustment};
use sqlx::SqlitePool;

const ITEM_COLUMNS: &str = "id, name, inventory_type, stock_quantity, initial_stock, \
     low_stock_alert, is_available, auto_mark_unavailable, version, created_at, updated_at";

/// Stock-field changes applied by one mutation. `None` keeps the current
/// column value (fields are never nulled here; only mode conversion does
/// that).
#[derive(Debug, Clone)]
pub struct StockMutation {
    pub new_stock_quantity: i64,
    pub new_is_available: Option<bool>,
    pub new_initial_stock: Option<i64>,
    pub new_low_stock_alert: Option<i64>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM menu_item WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

/// Insert a new menu item, normalizing stock fields by inventory mode
pub async fn insert(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("Name cannot be empty".into()));
    }

    let tracked = data.inventory_type == InventoryType::Tracked;
    let stock = if tracked {
        Some(data.stock_quantity.unwrap_or(0))
    } else {
        None
    };
    let alert = if tracked {
        Some(data.low_stock_alert.unwrap_or(0))
    } else {
        None
    };
    if stock.is_some_and(|q| q < 0) {
        return Err(RepoError::Validation("Stock quantity cannot be negative".into()));
    }
    if alert.is_some_and(|a| a < 0) {
        return Err(RepoError::Validation("Low stock alert cannot be negative".into()));
    }

    let auto_mark = if tracked {
        data.auto_mark_unavailable.unwrap_or(true)
    } else {
        data.auto_mark_unavailable.unwrap_or(false)
    };
    let is_available = !(tracked && auto_mark && stock == Some(0));

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO menu_item (id, name, inventory_type, stock_quantity, initial_stock, \
         low_stock_alert, is_available, auto_mark_unavailable, version, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
    )
    .bind(id)
    .bind(data.name)
    .bind(data.inventory_type)
    .bind(stock)
    .bind(alert)
    .bind(is_available)
    .bind(auto_mark)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// All TRACKED items at or below their low-stock threshold
pub async fn find_low_stock(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM menu_item \
         WHERE inventory_type = 'TRACKED' AND stock_quantity <= low_stock_alert \
         ORDER BY stock_quantity ASC, name ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// All TRACKED items with zero stock
pub async fn find_out_of_stock(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM menu_item \
         WHERE inventory_type = 'TRACKED' AND stock_quantity = 0 \
         ORDER BY name ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Atomically apply one stock mutation and append its ledger entry.
///
/// The UPDATE is guarded by `version`; zero affected rows means another
/// writer got there first (or the row is gone) and the whole transaction
/// aborts with [`RepoError::Conflict`] so the caller can re-read and retry.
pub async fn commit_stock_mutation(
    pool: &SqlitePool,
    item_id: i64,
    expected_version: i64,
    mutation: &StockMutation,
    draft: AdjustmentDraft,
) -> RepoResult<(MenuItem, StockAdjustment)> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE menu_item SET stock_quantity = ?1, \
         initial_stock = COALESCE(?2, initial_stock), \
         low_stock_alert = COALESCE(?3, low_stock_alert), \
         is_available = COALESCE(?4, is_available), \
         version = version + 1, updated_at = ?5 \
         WHERE id = ?6 AND version = ?7 AND inventory_type = 'TRACKED'",
    )
    .bind(mutation.new_stock_quantity)
    .bind(mutation.new_initial_stock)
    .bind(mutation.new_low_stock_alert)
    .bind(mutation.new_is_available)
    .bind(now)
    .bind(item_id)
    .bind(expected_version)
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        // Dropped transaction rolls back
        return Err(RepoError::Conflict(format!(
            "Menu item {item_id} was modified concurrently"
        )));
    }

    let adjustment = stock_adjustment::insert_tx(&mut tx, draft, now).await?;

    let item = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM menu_item WHERE id = ?"
    ))
    .bind(item_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((item, adjustment))
}

/// Switch inventory mode; single-row update, no ledger entry.
///
/// TRACKED -> UNLIMITED nulls the stock trio; UNLIMITED -> TRACKED zeroes
/// it and turns `auto_mark_unavailable` on until a reset populates real
/// stock. The mode predicate in each statement makes same-state writes
/// impossible at this layer.
pub async fn convert_inventory_type(
    pool: &SqlitePool,
    item_id: i64,
    expected_version: i64,
    data: &InventoryTypeUpdate,
) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();

    let rows = match data.inventory_type {
        InventoryType::Unlimited => {
            sqlx::query(
                "UPDATE menu_item SET inventory_type = 'UNLIMITED', \
                 stock_quantity = NULL, initial_stock = NULL, low_stock_alert = NULL, \
                 version = version + 1, updated_at = ?1 \
                 WHERE id = ?2 AND version = ?3 AND inventory_type = 'TRACKED'",
            )
            .bind(now)
            .bind(item_id)
            .bind(expected_version)
            .execute(pool)
            .await?
        }
        InventoryType::Tracked => {
            sqlx::query(
                "UPDATE menu_item SET inventory_type = 'TRACKED', \
                 stock_quantity = 0, initial_stock = 0, low_stock_alert = ?1, \
                 auto_mark_unavailable = 1, \
                 version = version + 1, updated_at = ?2 \
                 WHERE id = ?3 AND version = ?4 AND inventory_type = 'UNLIMITED'",
            )
            .bind(data.low_stock_alert.unwrap_or(0))
            .bind(now)
            .bind(item_id)
            .bind(expected_version)
            .execute(pool)
            .await?
        }
    };

    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Menu item {item_id} was modified concurrently"
        )));
    }

    find_by_id(pool, item_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {item_id} not found")))
}
