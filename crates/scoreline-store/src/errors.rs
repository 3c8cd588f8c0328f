//! Error handling for scoreline-store
//!
//! Wraps scoreline-core ExError with store-specific constructors

use scoreline_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an error for a document that exists but does not parse
pub fn corrupt_document(path: &Path, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("decode_document")
        .with_path(path.display().to_string())
        .with_message(format!("Unreadable document: {}", err))
}

/// Create an error for a value that cannot be encoded
pub fn serialization_error(path: &Path, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("encode_document")
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a lock exhaustion error
pub fn lock_exhausted(lock_path: &Path, attempts: u32) -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op("lock_acquire")
        .with_path(lock_path.display().to_string())
        .with_message(format!("Lock still held after {} attempts", attempts))
}

/// Create a configuration error
pub fn invalid_config(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("store_config")
        .with_message(reason.to_string())
}
