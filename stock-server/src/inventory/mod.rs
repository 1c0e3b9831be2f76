//! Inventory Module
//!
//! Stock tracking for menu items: pure policy rules, the orchestrating
//! service, and (via `db::repository`) the atomic ledger store beneath it.

pub mod policy;
pub mod service;

pub use service::StockService;
