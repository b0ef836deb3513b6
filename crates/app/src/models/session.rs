//! Session-related types.
//!
//! The session is what survives a reload: enough to render the signed-in
//! user, nothing that could be replayed as a credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use latchkey_core::{AccountId, Email};

use super::account::Account;

/// The authenticated user's non-secret profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Account id.
    pub id: AccountId,
    /// Display name.
    pub full_name: String,
    /// Login key.
    pub email: Email,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
    /// When the login that created this session happened.
    pub authenticated_at: DateTime<Utc>,
}

impl Session {
    /// Start a session for `account`, stripping the credential.
    #[must_use]
    pub fn start(account: &Account, authenticated_at: DateTime<Utc>) -> Self {
        Self {
            id: account.id.clone(),
            full_name: account.full_name.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
            authenticated_at,
        }
    }
}
