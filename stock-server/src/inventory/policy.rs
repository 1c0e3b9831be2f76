//! Stock Policy
//!
//! Pure validation and derivation rules for stock mutations. No I/O here;
//! the service composes these with the repository.

use crate::utils::{AppError, AppResult};
use shared::models::MenuItem;

/// Mode-mismatch message for daily resets
pub const MSG_RESET_REQUIRES_TRACKED: &str = "Only TRACKED items can have stock reset";
/// Mode-mismatch message for manual adds
pub const MSG_ADD_REQUIRES_TRACKED: &str = "Cannot add stock to UNLIMITED items";
/// Mode-mismatch message for manual removes
pub const MSG_REMOVE_REQUIRES_TRACKED: &str = "Cannot remove stock from UNLIMITED items";

/// Reject negative reset quantities (zero is a valid reset target)
pub fn validate_reset_quantity(quantity: i64) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::validation("Reset quantity cannot be negative"));
    }
    Ok(())
}

/// Require a TRACKED item and return its current stock level.
///
/// `message` is the operation-specific mode-mismatch text surfaced to the
/// caller. A TRACKED row without a stock quantity violates the storage
/// invariant and is reported as an internal error.
pub fn require_tracked(item: &MenuItem, message: &str) -> AppResult<i64> {
    if !item.is_tracked() {
        return Err(AppError::not_tracked(message).with_detail("item_id", item.id));
    }
    item.stock_quantity.ok_or_else(|| {
        AppError::internal(format!("TRACKED item {} has no stock quantity", item.id))
    })
}

/// Stock level after a manual add
pub fn apply_add(current: i64, quantity: i64) -> AppResult<i64> {
    if quantity <= 0 {
        return Err(AppError::validation("Quantity must be greater than zero"));
    }
    Ok(current + quantity)
}

/// Stock level after a manual remove; never goes below zero
pub fn apply_remove(current: i64, quantity: i64) -> AppResult<i64> {
    if quantity <= 0 {
        return Err(AppError::validation("Quantity must be greater than zero"));
    }
    if quantity > current {
        return Err(AppError::insufficient_stock("Insufficient stock to remove")
            .with_detail("current_stock", current)
            .with_detail("requested", quantity));
    }
    Ok(current - quantity)
}

/// Availability after a stock change.
///
/// Zero stock with `auto_mark_unavailable` forces false; otherwise the
/// caller-chosen availability stands (reset/add pass `true` to re-enable).
pub fn derive_availability(new_stock: i64, auto_mark_unavailable: bool, current: bool) -> bool {
    if auto_mark_unavailable && new_stock == 0 {
        false
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::models::InventoryType;

    fn item(inventory_type: InventoryType, stock: Option<i64>) -> MenuItem {
        MenuItem {
            id: 1,
            name: "Paella".into(),
            inventory_type,
            stock_quantity: stock,
            initial_stock: stock,
            low_stock_alert: stock.map(|_| 0),
            is_available: true,
            auto_mark_unavailable: true,
            version: 1,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_validate_reset_quantity() {
        assert!(validate_reset_quantity(0).is_ok());
        assert!(validate_reset_quantity(30).is_ok());
        let err = validate_reset_quantity(-1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_require_tracked_returns_stock() {
        let tracked = item(InventoryType::Tracked, Some(5));
        assert_eq!(require_tracked(&tracked, MSG_ADD_REQUIRES_TRACKED).unwrap(), 5);
    }

    #[test]
    fn test_require_tracked_rejects_unlimited_with_message() {
        let unlimited = item(InventoryType::Unlimited, None);
        let err = require_tracked(&unlimited, MSG_ADD_REQUIRES_TRACKED).unwrap_err();
        assert_eq!(err.code, ErrorCode::InventoryNotTracked);
        assert_eq!(err.message, "Cannot add stock to UNLIMITED items");
    }

    #[test]
    fn test_require_tracked_flags_invariant_violation() {
        let broken = item(InventoryType::Tracked, None);
        let err = require_tracked(&broken, MSG_ADD_REQUIRES_TRACKED).unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_apply_add() {
        assert_eq!(apply_add(5, 3).unwrap(), 8);
        assert_eq!(apply_add(0, 1).unwrap(), 1);
        assert_eq!(apply_add(5, 0).unwrap_err().code, ErrorCode::ValidationFailed);
        assert_eq!(apply_add(5, -2).unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_apply_remove() {
        assert_eq!(apply_remove(5, 3).unwrap(), 2);
        assert_eq!(apply_remove(5, 5).unwrap(), 0);
        assert_eq!(apply_remove(5, 0).unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_apply_remove_insufficient() {
        let err = apply_remove(2, 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Insufficient stock to remove");
    }

    #[test]
    fn test_derive_availability() {
        // auto-mark forces false at zero
        assert!(!derive_availability(0, true, true));
        // without auto-mark the caller's choice stands
        assert!(derive_availability(0, false, true));
        assert!(derive_availability(3, true, true));
        assert!(!derive_availability(3, true, false));
    }
}
