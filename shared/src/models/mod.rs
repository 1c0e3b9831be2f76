//! Data models
//!
//! Shared between stock-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod menu_item;
pub mod stock_adjustment;

// Re-exports
pub use menu_item::*;
pub use stock_adjustment::*;
