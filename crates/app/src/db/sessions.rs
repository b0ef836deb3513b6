//! Session repository.

use super::RepositoryError;
use crate::models::Session;
use crate::storage::{KeyValueStore, keys};

/// Repository for the persisted current session.
pub struct SessionRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Load the persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be read.
    /// Returns `RepositoryError::DataCorruption` if the record does not decode.
    pub fn load(&self) -> Result<Option<Session>, RepositoryError> {
        let Some(raw) = self.store.get(keys::CURRENT_USER)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid session record: {e}")))
    }

    /// Persist `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(session).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize session: {e}"))
        })?;
        self.store.set(keys::CURRENT_USER, &raw)?;
        Ok(())
    }

    /// Remove the persisted session. Succeeds when none is stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(keys::CURRENT_USER)?;
        Ok(())
    }
}
