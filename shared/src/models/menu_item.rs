//! Menu Item Model (stock view)

use serde::{Deserialize, Serialize};

/// Inventory mode of a menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum InventoryType {
    /// Stock is counted and enforced
    Tracked,
    /// Stock is not tracked, item is always available
    Unlimited,
}

/// Menu item entity (stock-relevant fields)
///
/// Invariant: `stock_quantity`, `initial_stock` and `low_stock_alert` are
/// present iff `inventory_type` is TRACKED. The repository enforces this at
/// both write paths (stock mutation and mode conversion).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub inventory_type: InventoryType,
    /// Current stock level, TRACKED only
    pub stock_quantity: Option<i64>,
    /// Stock set by the last reset/conversion, not touched by add/remove
    pub initial_stock: Option<i64>,
    /// Low-stock threshold (inclusive), TRACKED only
    pub low_stock_alert: Option<i64>,
    pub is_available: bool,
    /// When true, reaching zero stock forces is_available = false
    pub auto_mark_unavailable: bool,
    /// Optimistic concurrency counter, bumped by every row update
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItem {
    /// Whether this item participates in stock tracking
    pub fn is_tracked(&self) -> bool {
        self.inventory_type == InventoryType::Tracked
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub inventory_type: InventoryType,
    /// Starting stock for TRACKED items (default 0), ignored for UNLIMITED
    pub stock_quantity: Option<i64>,
    /// Low-stock threshold for TRACKED items (default 0), ignored for UNLIMITED
    pub low_stock_alert: Option<i64>,
    pub auto_mark_unavailable: Option<bool>,
}

/// Update inventory mode payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryTypeUpdate {
    pub inventory_type: InventoryType,
    /// Threshold applied when converting to TRACKED (default 0)
    pub low_stock_alert: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_type_serde_screaming_case() {
        assert_eq!(
            serde_json::to_string(&InventoryType::Tracked).unwrap(),
            "\"TRACKED\""
        );
        assert_eq!(
            serde_json::to_string(&InventoryType::Unlimited).unwrap(),
            "\"UNLIMITED\""
        );
        let t: InventoryType = serde_json::from_str("\"TRACKED\"").unwrap();
        assert_eq!(t, InventoryType::Tracked);
    }
}
