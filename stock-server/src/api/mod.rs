//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`inventory`] - 库存管理接口

pub mod health;
pub mod inventory;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
