//! Storage operation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    /// Filename failed the path-traversal check. Checked before any
    /// filesystem access.
    #[error("Invalid filename: {0}")]
    InvalidName(String),

    /// Extension not accepted by the serving route.
    #[error("Invalid file type: {0}")]
    InvalidExtension(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
