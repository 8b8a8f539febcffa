//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("could not determine application data directory")]
    NoDataDir,

    /// I/O error, e.g. creating the database directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}
