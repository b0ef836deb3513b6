//! Unified error type for front ends.
//!
//! Library operations return their own layer's error; front ends such as
//! the CLI funnel everything into [`AppError`] so `run` has a single return
//! type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::{AuthError, CredentialError};
use crate::storage::StorageError;
use crate::views::{FormErrors, SubmitError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The profile could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The password hasher could not be built.
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// An authentication operation was rejected or failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// A form failed validation.
    #[error("{0}")]
    Invalid(FormErrors),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(errors) => Self::Invalid(errors),
            SubmitError::Auth(err) => Self::Auth(err),
        }
    }
}
