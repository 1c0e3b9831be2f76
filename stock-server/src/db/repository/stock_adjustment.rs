//! Stock Adjustment Repository
//!
//! Append-only: only insert (inside the mutation transaction) and reads.
//! No update/delete interface exists for ledger rows.

use super::RepoResult;
use shared::models::{AdjustmentType, StockAdjustment};
use sqlx::{Sqlite, SqlitePool, Transaction};

const ADJUSTMENT_COLUMNS: &str = "id, menu_item_id, adjustment_type, previous_stock, \
     new_stock, quantity, reason, user_id, created_at";

/// Fields of the ledger entry to append; id and created_at are assigned at
/// insert time.
#[derive(Debug, Clone)]
pub struct AdjustmentDraft {
    pub menu_item_id: i64,
    pub adjustment_type: AdjustmentType,
    pub previous_stock: i64,
    pub new_stock: i64,
    pub quantity: i64,
    pub reason: Option<String>,
    pub user_id: Option<String>,
}

/// Append one ledger entry inside the caller's transaction
pub async fn insert_tx(
    tx: &mut Transaction<'_, Sqlite>,
    draft: AdjustmentDraft,
    now: i64,
) -> RepoResult<StockAdjustment> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO stock_adjustment (id, menu_item_id, adjustment_type, previous_stock, \
         new_stock, quantity, reason, user_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(draft.menu_item_id)
    .bind(draft.adjustment_type)
    .bind(draft.previous_stock)
    .bind(draft.new_stock)
    .bind(draft.quantity)
    .bind(draft.reason.clone())
    .bind(draft.user_id.clone())
    .bind(now)
    .execute(&mut **tx)
    .await?;

    Ok(StockAdjustment {
        id,
        menu_item_id: draft.menu_item_id,
        adjustment_type: draft.adjustment_type,
        previous_stock: draft.previous_stock,
        new_stock: draft.new_stock,
        quantity: draft.quantity,
        reason: draft.reason,
        user_id: draft.user_id,
        created_at: now,
    })
}

/// One page of an item's adjustment history, newest first, plus the total
/// row count for that item
pub async fn find_history(
    pool: &SqlitePool,
    menu_item_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<StockAdjustment>, i64)> {
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM stock_adjustment WHERE menu_item_id = ?")
            .bind(menu_item_id)
            .fetch_one(pool)
            .await?;

    // id DESC breaks ties between entries created in the same millisecond
    let rows = sqlx::query_as::<_, StockAdjustment>(&format!(
        "SELECT {ADJUSTMENT_COLUMNS} FROM stock_adjustment \
         WHERE menu_item_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    ))
    .bind(menu_item_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows, total))
}
