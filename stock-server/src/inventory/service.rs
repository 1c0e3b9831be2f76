//! Stock Service
//!
//! Orchestrates policy checks and the ledger store to implement the public
//! stock operations. Every mutation re-reads the persisted row, validates
//! against it, and commits through the version-guarded repository call; a
//! bounded retry loop absorbs optimistic-lock conflicts from concurrent
//! writers of the same item.

use sqlx::SqlitePool;

use crate::db::repository::RepoError;
use crate::db::repository::menu_item::{self, StockMutation};
use crate::db::repository::stock_adjustment::{self, AdjustmentDraft};
use crate::inventory::policy;
use crate::utils::{AppError, AppResult};
use shared::models::{
    AdjustmentType, DailyResetRequest, InventoryTypeUpdate, MenuItem, Page, StockAddRequest,
    StockAdjustment, StockRemoveRequest, StockResetEntry, StockResetOutcome,
};

/// Commit attempts per mutation before surfacing a conflict to the caller
const MAX_COMMIT_ATTEMPTS: u32 = 3;
/// Upper bound on history page size
const MAX_PAGE_SIZE: i64 = 100;

/// Stock operations over one database pool.
///
/// Constructed with its pool (no global state); cloning is cheap.
#[derive(Clone)]
pub struct StockService {
    pool: SqlitePool,
}

impl StockService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Current stock snapshot of one item
    pub async fn get_item(&self, item_id: i64) -> AppResult<MenuItem> {
        self.load_item(item_id).await
    }

    /// Manually add stock to a TRACKED item.
    ///
    /// Adding stock always clears unavailability. Writes one MANUAL_ADD
    /// ledger entry in the same transaction.
    pub async fn add_stock(
        &self,
        item_id: i64,
        request: StockAddRequest,
        user_id: &str,
    ) -> AppResult<MenuItem> {
        require_reason(&request.reason)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let item = self.load_item(item_id).await?;
            let current = policy::require_tracked(&item, policy::MSG_ADD_REQUIRES_TRACKED)?;
            let new_stock = policy::apply_add(current, request.quantity)?;

            let mutation = StockMutation {
                new_stock_quantity: new_stock,
                new_is_available: Some(true),
                new_initial_stock: None,
                new_low_stock_alert: None,
            };
            let draft = AdjustmentDraft {
                menu_item_id: item_id,
                adjustment_type: AdjustmentType::ManualAdd,
                previous_stock: current,
                new_stock,
                quantity: request.quantity,
                reason: Some(request.reason.clone()),
                user_id: Some(user_id.to_string()),
            };

            match menu_item::commit_stock_mutation(&self.pool, item_id, item.version, &mutation, draft)
                .await
            {
                Ok((updated, _)) => {
                    tracing::info!(item_id, quantity = request.quantity, new_stock, "Stock added");
                    return Ok(updated);
                }
                Err(RepoError::Conflict(_)) if attempt < MAX_COMMIT_ATTEMPTS => continue,
                Err(RepoError::Conflict(_)) => return Err(AppError::stock_conflict(item_id)),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Manually remove stock from a TRACKED item.
    ///
    /// Fails without mutating anything when the requested quantity exceeds
    /// the current stock. Reaching zero with `auto_mark_unavailable` marks
    /// the item unavailable in the same transaction.
    pub async fn remove_stock(
        &self,
        item_id: i64,
        request: StockRemoveRequest,
        user_id: &str,
    ) -> AppResult<MenuItem> {
        require_reason(&request.reason)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let item = self.load_item(item_id).await?;
            let current = policy::require_tracked(&item, policy::MSG_REMOVE_REQUIRES_TRACKED)?;
            let new_stock = policy::apply_remove(current, request.quantity)?;
            let is_available =
                policy::derive_availability(new_stock, item.auto_mark_unavailable, true);

            let mutation = StockMutation {
                new_stock_quantity: new_stock,
                new_is_available: Some(is_available),
                new_initial_stock: None,
                new_low_stock_alert: None,
            };
            let draft = AdjustmentDraft {
                menu_item_id: item_id,
                adjustment_type: AdjustmentType::ManualRemove,
                previous_stock: current,
                new_stock,
                quantity: request.quantity,
                reason: Some(request.reason.clone()),
                user_id: Some(user_id.to_string()),
            };

            match menu_item::commit_stock_mutation(&self.pool, item_id, item.version, &mutation, draft)
                .await
            {
                Ok((updated, _)) => {
                    tracing::info!(
                        item_id,
                        quantity = request.quantity,
                        new_stock,
                        is_available,
                        "Stock removed"
                    );
                    return Ok(updated);
                }
                Err(RepoError::Conflict(_)) if attempt < MAX_COMMIT_ATTEMPTS => continue,
                Err(RepoError::Conflict(_)) => return Err(AppError::stock_conflict(item_id)),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Reset a batch of TRACKED items to absolute start-of-day quantities.
    ///
    /// Entries are processed independently: each one commits (or fails) on
    /// its own, and the outcome list reports per entry, in input order,
    /// either the updated item or the error. One bad entry never rolls
    /// back or blocks the others.
    pub async fn daily_stock_reset(
        &self,
        request: DailyResetRequest,
        user_id: Option<&str>,
    ) -> Vec<StockResetOutcome> {
        let mut outcomes = Vec::with_capacity(request.items.len());
        for entry in &request.items {
            let outcome = match self
                .reset_entry(entry, request.reason.as_deref(), user_id)
                .await
            {
                Ok(item) => StockResetOutcome::ok(entry.item_id, item),
                Err(err) => {
                    tracing::warn!(item_id = entry.item_id, error = %err, "Daily reset entry failed");
                    StockResetOutcome::failed(entry.item_id, err.message)
                }
            };
            outcomes.push(outcome);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
        tracing::info!(
            total = outcomes.len(),
            succeeded,
            "Daily stock reset finished"
        );
        outcomes
    }

    async fn reset_entry(
        &self,
        entry: &StockResetEntry,
        reason: Option<&str>,
        user_id: Option<&str>,
    ) -> AppResult<MenuItem> {
        policy::validate_reset_quantity(entry.quantity)?;
        if entry.low_stock_alert.is_some_and(|a| a < 0) {
            return Err(AppError::validation("Low stock alert cannot be negative"));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            let item = self.load_item(entry.item_id).await?;
            let previous = policy::require_tracked(&item, policy::MSG_RESET_REQUIRES_TRACKED)?;

            let mutation = StockMutation {
                new_stock_quantity: entry.quantity,
                new_is_available: Some(true),
                new_initial_stock: Some(entry.quantity),
                new_low_stock_alert: entry.low_stock_alert,
            };
            let draft = AdjustmentDraft {
                menu_item_id: entry.item_id,
                adjustment_type: AdjustmentType::DailyReset,
                previous_stock: previous,
                new_stock: entry.quantity,
                // Ledger records the magnitude; a reset landing on the
                // current value still gets its row, with quantity 0
                quantity: (entry.quantity - previous).abs(),
                reason: reason.map(str::to_string),
                user_id: user_id.map(str::to_string),
            };

            match menu_item::commit_stock_mutation(
                &self.pool,
                entry.item_id,
                item.version,
                &mutation,
                draft,
            )
            .await
            {
                Ok((updated, _)) => return Ok(updated),
                Err(RepoError::Conflict(_)) if attempt < MAX_COMMIT_ATTEMPTS => continue,
                Err(RepoError::Conflict(_)) => return Err(AppError::stock_conflict(entry.item_id)),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// All TRACKED items at or below their low-stock threshold
    pub async fn get_low_stock_items(&self) -> AppResult<Vec<MenuItem>> {
        Ok(menu_item::find_low_stock(&self.pool).await?)
    }

    /// All TRACKED items with zero stock
    pub async fn get_out_of_stock_items(&self) -> AppResult<Vec<MenuItem>> {
        Ok(menu_item::find_out_of_stock(&self.pool).await?)
    }

    /// One page of an item's adjustment history, newest first
    pub async fn get_stock_history(
        &self,
        item_id: i64,
        page: i64,
        limit: i64,
    ) -> AppResult<Page<StockAdjustment>> {
        if page < 1 || limit < 1 {
            return Err(AppError::validation("Page and limit must be at least 1"));
        }
        let limit = limit.min(MAX_PAGE_SIZE);

        // Unknown items are an error, not an empty page
        self.load_item(item_id).await?;

        let offset = (page - 1) * limit;
        let (items, total) =
            stock_adjustment::find_history(&self.pool, item_id, limit, offset).await?;
        Ok(Page::new(items, page, limit, total))
    }

    /// Switch an item between TRACKED and UNLIMITED.
    ///
    /// A configuration change, not a quantity change: no ledger entry is
    /// written. Converting to the current mode is a no-op.
    pub async fn update_inventory_type(
        &self,
        item_id: i64,
        update: InventoryTypeUpdate,
    ) -> AppResult<MenuItem> {
        if update.low_stock_alert.is_some_and(|a| a < 0) {
            return Err(AppError::validation("Low stock alert cannot be negative"));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            let item = self.load_item(item_id).await?;
            if item.inventory_type == update.inventory_type {
                return Ok(item);
            }

            match menu_item::convert_inventory_type(&self.pool, item_id, item.version, &update)
                .await
            {
                Ok(converted) => {
                    tracing::info!(
                        item_id,
                        inventory_type = ?converted.inventory_type,
                        "Inventory mode changed"
                    );
                    return Ok(converted);
                }
                Err(RepoError::Conflict(_)) if attempt < MAX_COMMIT_ATTEMPTS => continue,
                Err(RepoError::Conflict(_)) => return Err(AppError::stock_conflict(item_id)),
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn load_item(&self, item_id: i64) -> AppResult<MenuItem> {
        let item = menu_item::find_by_id(&self.pool, item_id).await?;
        item.ok_or_else(|| AppError::item_not_found(item_id))
    }
}

fn require_reason(reason: &str) -> AppResult<()> {
    if reason.trim().is_empty() {
        return Err(AppError::validation("Reason is required").with_detail("field", "reason"));
    }
    Ok(())
}
