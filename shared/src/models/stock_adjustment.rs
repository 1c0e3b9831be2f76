//! Stock Adjustment Model (库存调整流水)
//!
//! Append-only audit records of stock quantity changes. Rows are created
//! inside the same transaction as the menu item update and never modified
//! afterwards.

use serde::{Deserialize, Serialize};

use super::menu_item::MenuItem;

/// Kind of stock quantity change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AdjustmentType {
    /// Start-of-day reinitialization to an absolute quantity
    DailyReset,
    /// Manual stock increase by an operator
    ManualAdd,
    /// Manual stock decrease by an operator
    ManualRemove,
}

/// One committed stock quantity change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockAdjustment {
    pub id: i64,
    pub menu_item_id: i64,
    pub adjustment_type: AdjustmentType,
    /// Stock level immediately before the mutating transaction
    pub previous_stock: i64,
    /// Stock level immediately after the mutating transaction
    pub new_stock: i64,
    /// Magnitude of the change; direction is implied by the type
    pub quantity: i64,
    /// Justification; required for manual operations
    pub reason: Option<String>,
    /// Actor identity; absent for system-issued daily resets
    pub user_id: Option<String>,
    pub created_at: i64,
}

/// Manual stock add payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAddRequest {
    pub quantity: i64,
    pub reason: String,
}

/// Manual stock remove payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRemoveRequest {
    pub quantity: i64,
    pub reason: String,
}

/// One entry of a daily stock reset batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockResetEntry {
    pub item_id: i64,
    /// Absolute stock level to reset to (also becomes initial_stock)
    pub quantity: i64,
    /// New low-stock threshold, kept unchanged if absent
    pub low_stock_alert: Option<i64>,
}

/// Daily stock reset batch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyResetRequest {
    pub items: Vec<StockResetEntry>,
    /// Optional justification recorded on every reset row ("Begin of the day")
    pub reason: Option<String>,
}

/// Per-entry outcome of a daily stock reset batch
///
/// Entries are processed independently; the response carries, in input
/// order, either the updated item or that entry's error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockResetOutcome {
    pub item_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<MenuItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StockResetOutcome {
    pub fn ok(item_id: i64, item: MenuItem) -> Self {
        Self {
            item_id,
            item: Some(item),
            error: None,
        }
    }

    pub fn failed(item_id: i64, error: impl Into<String>) -> Self {
        Self {
            item_id,
            item: None,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.item.is_some()
    }
}

/// Page metadata for paginated queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// 1-based page number
    pub page: i64,
    pub limit: i64,
    /// Total row count across all pages
    pub total: i64,
    pub total_pages: i64,
}

/// One page of a sorted query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            items,
            meta: PageMeta {
                page,
                limit,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_type_serde() {
        assert_eq!(
            serde_json::to_string(&AdjustmentType::DailyReset).unwrap(),
            "\"DAILY_RESET\""
        );
        assert_eq!(
            serde_json::to_string(&AdjustmentType::ManualAdd).unwrap(),
            "\"MANUAL_ADD\""
        );
        assert_eq!(
            serde_json::to_string(&AdjustmentType::ManualRemove).unwrap(),
            "\"MANUAL_REMOVE\""
        );
    }

    #[test]
    fn test_page_meta_total_pages() {
        let page: Page<i32> = Page::new(vec![], 1, 20, 0);
        assert_eq!(page.meta.total_pages, 0);

        let page: Page<i32> = Page::new(vec![1, 2, 3], 1, 20, 3);
        assert_eq!(page.meta.total_pages, 1);

        let page: Page<i32> = Page::new(vec![1, 2], 2, 2, 5);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[test]
    fn test_reset_outcome_serialization_omits_empty_side() {
        let failed = StockResetOutcome::failed(7, "Only TRACKED items can have stock reset");
        let json = serde_json::to_string(&failed).unwrap();
        assert!(json.contains("error"));
        assert!(!json.contains("\"item\""));
        assert!(!failed.is_ok());
    }
}
