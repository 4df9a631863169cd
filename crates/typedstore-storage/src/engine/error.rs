//! Storage error types.

use thiserror::Error;

/// Result type for raw store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in raw store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not be opened.
    #[error("failed to open store: {0}")]
    Open(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend reported an error.
    #[error("internal storage error: {0}")]
    Internal(String),

    /// A lock guarding the backend was poisoned by a panicking thread.
    #[error("storage lock poisoned")]
    LockPoisoned,

    /// Compaction failed.
    #[error("compaction failed: {0}")]
    Compaction(String),

    /// The operation is not supported.
    #[error("operation not supported: {0}")]
    Unsupported(String),
}
