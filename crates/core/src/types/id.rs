//! Account identifiers.
//!
//! Account ids are opaque tokens generated at registration. They are stored
//! as strings so records written by other tools (or older versions) with a
//! different token shape still load.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier of a registered account.
///
/// # Example
///
/// ```rust
/// # use latchkey_core::AccountId;
/// let a = AccountId::generate();
/// let b = AccountId::generate();
///
/// assert_ne!(a, b);
/// assert!(!a.as_str().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Generate a fresh random id (UUID v4, simple hex form).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
