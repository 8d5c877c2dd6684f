//! Error types for task store operations.

use thiserror::Error;

/// Errors that can occur during [`TaskStore`](crate::store::TaskStore)
/// operations.
///
/// All variants are recoverable: the store rejects the offending operation
/// and leaves both collections in a consistent state. A persistence failure
/// is reported after the in-memory mutation has been applied, so the caller
/// can retry the save without losing the change.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Task text was empty after trimming.
    #[error("task text must not be empty")]
    EmptyText,

    /// No task with the given id in the expected collection.
    #[error("task not found: {0}")]
    NotFound(String),

    /// Failed to read or write the backing store.
    #[error("storage error: {0}")]
    Persistence(#[from] std::io::Error),

    /// Failed to encode a collection as JSON.
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}
