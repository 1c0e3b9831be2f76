//! Repository Module
//!
//! CRUD and atomic stock mutation over SQLite tables. Repositories are
//! free functions taking an explicit `&SqlitePool`; no global state.

pub mod menu_item;
pub mod stock_adjustment;

#[cfg(test)]
pub(crate) mod test_support;

use crate::utils::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Concurrent update conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => {
                AppError::with_message(crate::utils::ErrorCode::ProductNotFound, msg)
            }
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Conflict(msg) => {
                AppError::with_message(crate::utils::ErrorCode::StockConflict, msg)
            }
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}
