//! Stock Edge Server - 菜单库存管理服务
//!
//! # 架构概述
//!
//! 本模块是库存服务的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SQLite 存储（WAL 模式），菜单项 + 库存流水
//! - **库存** (`inventory`): 库存策略（纯函数）与库存服务（编排）
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! stock-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 数据库层（连接池、仓储）
//! ├── inventory/     # 库存策略与服务
//! ├── api/           # HTTP 路由和处理器
//! ├── routes.rs      # 路由装配与中间件
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod inventory;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use inventory::StockService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
