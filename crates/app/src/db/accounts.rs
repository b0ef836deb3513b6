//! Account repository.
//!
//! The account collection is stored as a single JSON array under the `users`
//! key. A missing key is an empty collection.

use latchkey_core::Email;

use super::RepositoryError;
use crate::models::Account;
use crate::storage::{KeyValueStore, keys};

/// Repository for the registered account collection.
pub struct AccountRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Load every account, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    /// Returns `RepositoryError::DataCorruption` if the stored value is not a
    /// valid account array.
    pub fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        let Some(raw) = self.store.get(keys::USERS)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid account collection: {e}"))
        })
    }

    /// Find every account registered under `email`.
    ///
    /// Uniqueness is enforced on insert, but a collection written by a
    /// concurrent process may still hold duplicates, so all matches are
    /// returned in stored order.
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list).
    pub fn find_by_email(&self, email: &Email) -> Result<Vec<Account>, RepositoryError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|account| &account.email == email)
            .collect())
    }

    /// Append `account` and persist the full collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Storage` or `RepositoryError::DataCorruption`
    /// if the collection cannot be read or written.
    pub fn insert(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut accounts = self.list()?;

        if accounts.iter().any(|existing| existing.email == account.email) {
            return Err(RepositoryError::Conflict(format!(
                "email already registered: {}",
                account.email
            )));
        }

        accounts.push(account.clone());
        self.save(&accounts)?;

        Ok(account)
    }

    fn save(&self, accounts: &[Account]) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(accounts).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize accounts: {e}"))
        })?;
        self.store.set(keys::USERS, &raw)?;
        Ok(())
    }
}
