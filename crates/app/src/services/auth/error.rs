//! Authentication error types.
//!
//! The `Display` text of every variant is the message shown to the user.
//! The catch-all variants keep the underlying fault as their `source`.

use thiserror::Error;

use super::password::CredentialError;
use crate::db::RepositoryError;

/// Unexpected fault behind a generic registration or login failure.
#[derive(Debug, Error)]
pub enum ServiceFault {
    /// Storage or decoding failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Password hashing failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Another account already uses the email.
    #[error("Email already exists")]
    DuplicateEmail,

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Registration hit an unexpected fault; nothing was written.
    #[error("Registration failed. Please try again.")]
    RegistrationFailed(#[source] ServiceFault),

    /// No account matches the email and password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Login hit an unexpected fault; the session is unchanged.
    #[error("Login failed. Please try again.")]
    LoginFailed(#[source] ServiceFault),

    /// The email is not structurally valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] latchkey_core::EmailError),

    /// Repository error outside register/login.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
