//! Repository Module
//!
//! Free functions over `SqlitePool` (or an open transaction) per table.
//! Repositories never read the clock; callers pass business dates and
//! timestamps in.

pub mod category;
pub mod order;
pub mod order_summary;
pub mod product;
pub mod staff;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepoError::Validation(db_err.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Database(format!("JSON column error: {err}"))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::database(msg)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
