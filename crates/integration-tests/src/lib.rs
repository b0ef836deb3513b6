//! Integration tests for Latchkey.
//!
//! Tests drive the session manager, guard, and views against an on-disk
//! profile in a temporary directory, reopening the profile to simulate a
//! restart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p latchkey-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use secrecy::SecretString;
use tempfile::TempDir;

use latchkey_app::config::HashingConfig;
use latchkey_app::services::auth::{CredentialHasher, Registration};
use latchkey_app::storage::{FileStore, StorageError};

/// A throwaway profile directory.
pub struct TestProfile {
    dir: TempDir,
}

impl TestProfile {
    /// Create an empty profile.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp profile"),
        }
    }

    /// Profile directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open the profile, as a fresh process would.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory cannot be opened.
    pub fn open(&self) -> Result<FileStore, StorageError> {
        FileStore::open(self.dir.path())
    }
}

impl Default for TestProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// Hasher with minimal costs so tests stay fast.
///
/// # Panics
///
/// Panics if argon2 rejects the parameters.
#[must_use]
pub fn fast_hasher() -> CredentialHasher {
    CredentialHasher::new(&HashingConfig {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build test hasher")
}

/// Wrap a test password.
#[must_use]
pub fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

/// Registration input with matching passwords.
#[must_use]
pub fn registration(full_name: &str, email: &str, password: &str) -> Registration {
    Registration {
        full_name: full_name.to_owned(),
        email: email.to_owned(),
        password: secret(password),
        confirm_password: secret(password),
    }
}
