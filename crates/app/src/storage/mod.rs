//! Persistent key-value storage.
//!
//! The credential store and session manager persist everything through the
//! [`KeyValueStore`] trait: string keys, string (JSON) values, one value per
//! key. Two backends are provided:
//!
//! - [`MemoryStore`] - a map held in memory; nothing survives the process
//! - [`FileStore`] - a profile directory, one `<key>.json` file per key
//!
//! # Keys
//!
//! - `users` - JSON array of every registered account (see [`keys::USERS`])
//! - `currentUser` - JSON record of the current session, absent when logged
//!   out (see [`keys::CURRENT_USER`])
//!
//! # Concurrency
//!
//! Backends take `&self` and are single-threaded. No locking is performed on
//! read-modify-write sequences: two processes sharing one profile directory
//! can overwrite each other's writes.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys used by the repositories.
pub mod keys {
    /// Key for the registered account collection.
    pub const USERS: &str = "users";

    /// Key for the persisted current session.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error for key '{key}' at {}: {source}", path.display())]
    Io {
        /// Key being accessed.
        key: String,
        /// File backing the key.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The profile directory could not be created.
    #[error("cannot create profile directory {}: {source}", path.display())]
    CreateProfile {
        /// Profile directory.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),
}

/// A string-keyed store of string values.
///
/// Implementations must make a successful [`set`](Self::set) visible to every
/// later [`get`](Self::get) on the same store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
