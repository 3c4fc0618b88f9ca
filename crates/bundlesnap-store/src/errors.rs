//! Error handling for bundlesnap-store
//!
//! Wraps bundlesnap-core ExError with store-specific helpers

use bundlesnap_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an IO error that names the file involved
pub fn io_error_at(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    io_error(operation, err).with_path(path)
}

/// Create a serialization error from serde_json::Error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an image encoding error
pub fn image_error(operation: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Image)
        .with_op(operation.to_string())
        .with_message(reason)
}

/// Create an error for a snapshot directory that cannot be read back
pub fn invalid_snapshot(path: &Path, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidSnapshot)
        .with_op("read_snapshot")
        .with_path(path)
        .with_message(reason)
}
