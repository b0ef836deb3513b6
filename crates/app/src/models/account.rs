//! Account domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use latchkey_core::{AccountId, Email};

/// A registered account, exactly as persisted in the account collection.
///
/// The credential is an argon2 PHC string; the plaintext password is never
/// stored. Accounts are created by registration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Opaque unique id generated at registration.
    pub id: AccountId,
    /// Display name.
    pub full_name: String,
    /// Login key; unique across the collection.
    pub email: Email,
    /// Salted one-way hash of the password (PHC string format).
    pub password_hash: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The account without its credential.
    #[must_use]
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Credential-free view of an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// Account id.
    pub id: AccountId,
    /// Display name.
    pub full_name: String,
    /// Login key.
    pub email: Email,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}
