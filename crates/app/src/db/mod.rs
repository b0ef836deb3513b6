//! Repositories over the key-value store.
//!
//! # Layout
//!
//! - `users` - the whole account collection, one JSON array
//!   ([`accounts::AccountRepository`])
//! - `currentUser` - the current session record
//!   ([`sessions::SessionRepository`])
//!
//! Every write rewrites the full value for its key. There is no locking or
//! version check around read-modify-write, so concurrent writers sharing one
//! profile can lose updates.

pub mod accounts;
pub mod sessions;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A stored value could not be decoded or encoded.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The write would violate a uniqueness constraint.
    #[error("conflict: {0}")]
    Conflict(String),
}
