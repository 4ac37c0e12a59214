//! Error types for the top-up engine.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during engine operation.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite failure outside of per-record ingestion
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// A company record was rejected during ingestion. The whole batch is
    /// rolled back.
    #[error("Failed to insert Company at position {index}: {reason}\nOffending record: {record}")]
    CompanyRejected {
        index: usize,
        reason: String,
        record: String,
    },

    /// A user record was rejected during ingestion. The whole batch is
    /// rolled back.
    #[error("Failed to insert User at position {index}: {reason}\nOffending record: {record}")]
    UserRejected {
        index: usize,
        reason: String,
        record: String,
    },

    /// Missing input file arguments
    #[error("Missing input files. Usage: topup-engine <companies.json> <users.json> [database.sqlite]")]
    MissingArgument,
}
