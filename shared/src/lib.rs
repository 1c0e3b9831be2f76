//! Shared types for the stock management service
//!
//! Common types used by the server and API consumers: error codes and
//! response structures, data models, and small utility functions.
//! DB row derives are feature-gated behind `db` so frontend-adjacent
//! consumers can use the models without pulling in sqlx.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
