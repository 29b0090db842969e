//! Repository Module
//!
//! CRUD operations over the SQLite tables. Functions are generic over
//! `sqlx::SqliteExecutor` so the evaluator, ledger posting, and the merge can
//! reuse them inside a single transaction.

pub mod access_log;
pub mod ledger;
pub mod member;
pub mod system_config;
pub mod visitor;
pub mod withdrawal;

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
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(err.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
