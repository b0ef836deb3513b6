//! Password hashing.
//!
//! New credentials are hashed with Argon2id using the configured costs.
//! Verification reads the algorithm and costs from the stored PHC string.

use argon2::{Algorithm, Argon2, Version};
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::config::HashingConfig;

/// Errors raised while hashing a credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The configured costs are outside argon2's limits.
    #[error("invalid argon2 parameters: {0}")]
    Params(String),

    /// Hashing itself failed.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Salted one-way password hasher.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// Create a hasher with the given costs.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Params` if the costs are rejected by argon2.
    pub fn new(config: &HashingConfig) -> Result<Self, CredentialError> {
        let params = config
            .params()
            .map_err(|e| CredentialError::Params(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hash` if argon2 fails.
    pub fn hash(&self, password: &SecretString) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hash(e.to_string()))
    }

    /// Check `password` against a stored hash.
    ///
    /// A stored value that is not a valid PHC string never verifies.
    #[must_use]
    pub fn verify(&self, password: &SecretString, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            tracing::warn!("Stored credential is not a valid password hash");
            return false;
        };

        self.argon2
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .is_ok()
    }
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("algorithm", &"argon2id")
            .finish_non_exhaustive()
    }
}
