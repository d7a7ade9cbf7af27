//! Error handling for openclimate-store
//!
//! Wraps openclimate-core ExError with store-specific helpers

use openclimate_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a schema bootstrap error
pub fn schema_error(version_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("schema_apply")
        .with_message(format!("Schema step {} failed: {}", version_id, reason))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// The connection lock was poisoned by a panic in another caller
pub fn lock_poisoned() -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op("store_lock")
        .with_message("store connection lock poisoned")
}
