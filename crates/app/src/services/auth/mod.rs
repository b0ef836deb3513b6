//! Authentication service.
//!
//! Provides registration, login, and logout against the local key-value
//! store, and owns the current session.
//!
//! # Lifecycle
//!
//! A [`SessionManager`] is constructed once per process. Construction reads
//! the persisted session (the "hydration" step); afterwards the in-memory
//! value is authoritative and every change is written through to storage and
//! broadcast on the session channel.
//!
//! # Registration order
//!
//! Registration checks the password confirmation before email uniqueness.
//! When both are wrong the caller sees `PasswordMismatch`.

mod error;
mod password;

pub use error::{AuthError, ServiceFault};
pub use password::{CredentialError, CredentialHasher};

use std::convert::Infallible;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, warn};

use latchkey_core::{AccountId, Email, Route};

use crate::db::RepositoryError;
use crate::db::accounts::AccountRepository;
use crate::db::sessions::SessionRepository;
use crate::middleware::AuthCheck;
use crate::models::{Account, AccountSummary, Session};
use crate::navigation::Navigator;
use crate::services::channel::{SessionChannel, SubscriptionId};
use crate::storage::KeyValueStore;

/// Registration input, as submitted by the registration form.
pub struct Registration {
    /// Display name.
    pub full_name: String,
    /// Login key.
    pub email: String,
    /// Chosen password.
    pub password: SecretString,
    /// Repeated password.
    pub confirm_password: SecretString,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

/// Credential store and session manager.
///
/// Owns the current session; borrows its storage and navigator.
pub struct SessionManager<'a> {
    accounts: AccountRepository<'a>,
    sessions: SessionRepository<'a>,
    navigator: &'a dyn Navigator,
    hasher: CredentialHasher,
    current: SessionChannel,
}

impl<'a> SessionManager<'a> {
    /// Create the session manager and hydrate the current session.
    ///
    /// A persisted session that cannot be read or decoded is treated as
    /// absent.
    #[must_use]
    pub fn new(
        store: &'a dyn KeyValueStore,
        navigator: &'a dyn Navigator,
        hasher: CredentialHasher,
    ) -> Self {
        let sessions = SessionRepository::new(store);

        let hydrated = match sessions.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable persisted session");
                None
            }
        };
        debug!(
            authenticated = hydrated.is_some(),
            "Hydrated session manager"
        );

        Self {
            accounts: AccountRepository::new(store),
            sessions,
            navigator,
            hasher,
            current: SessionChannel::new(hydrated),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new account.
    ///
    /// On success the account is persisted and navigation to the login view
    /// is requested.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns `AuthError::InvalidEmail` if the email is structurally invalid.
    /// Returns `AuthError::DuplicateEmail` if the email is already registered.
    /// Returns `AuthError::RegistrationFailed` on storage or hashing faults.
    pub fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        if registration.password.expose_secret() != registration.confirm_password.expose_secret() {
            warn!(email = %registration.email, "Registration rejected: passwords do not match");
            return Err(AuthError::PasswordMismatch);
        }

        let email = Email::parse(&registration.email)?;

        let account = self.create_account(registration, email).map_err(|fault| {
            match fault {
                ServiceFault::Repository(RepositoryError::Conflict(_)) => {
                    warn!(email = %registration.email, "Registration rejected: email already exists");
                    AuthError::DuplicateEmail
                }
                other => {
                    error!(error = %other, "Registration failed");
                    AuthError::RegistrationFailed(other)
                }
            }
        })?;

        info!(account_id = %account.id, email = %account.email, "Account registered");
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    fn create_account(
        &self,
        registration: &Registration,
        email: Email,
    ) -> Result<Account, ServiceFault> {
        // Insert rejects duplicates too; checking first skips the hash.
        if !self.accounts.find_by_email(&email)?.is_empty() {
            let conflict = format!("email already registered: {email}");
            return Err(RepositoryError::Conflict(conflict).into());
        }

        let password_hash = self.hasher.hash(&registration.password)?;

        let account = Account {
            id: AccountId::generate(),
            full_name: registration.full_name.clone(),
            email,
            password_hash,
            created_at: Utc::now(),
        };

        Ok(self.accounts.insert(account)?)
    }

    // =========================================================================
    // Login / Logout
    // =========================================================================

    /// Log in with email and password.
    ///
    /// On success the session is persisted, broadcast, and navigation to the
    /// dashboard is requested. A previous session is replaced.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches.
    /// Returns `AuthError::LoginFailed` on storage faults.
    pub fn login(&self, email: &str, password: &SecretString) -> Result<(), AuthError> {
        // An unparseable email cannot belong to any account.
        let Ok(email) = Email::parse(email) else {
            warn!("Login rejected: malformed email");
            return Err(AuthError::InvalidCredentials);
        };

        let session = self.authenticate(&email, password).map_err(|fault| {
            error!(error = %fault, "Login failed");
            AuthError::LoginFailed(fault)
        })?;

        let Some(session) = session else {
            warn!(email = %email, "Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        info!(account_id = %session.id, email = %session.email, "Logged in");
        self.current.publish(Some(session));
        self.navigator.navigate(Route::Dashboard);
        Ok(())
    }

    /// Find the matching account and persist a session for it.
    ///
    /// Returns `Ok(None)` when nothing matches; persisted state is untouched.
    fn authenticate(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Option<Session>, ServiceFault> {
        let account = self
            .accounts
            .find_by_email(email)?
            .into_iter()
            .find(|account| self.hasher.verify(password, &account.password_hash));

        let Some(account) = account else {
            return Ok(None);
        };

        let session = Session::start(&account, Utc::now());
        self.sessions.save(&session)?;
        Ok(Some(session))
    }

    /// Log out.
    ///
    /// Always succeeds: a failure to clear the persisted session is logged,
    /// and the in-memory session is cleared regardless.
    pub fn logout(&self) {
        if let Err(e) = self.sessions.clear() {
            error!(error = %e, "Failed to clear persisted session");
        }

        match self.current.value() {
            Some(session) => info!(account_id = %session.id, "Logged out"),
            None => debug!("Logout without an active session"),
        }

        self.current.publish(None);
        self.navigator.navigate(Route::Login);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether a session is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_present()
    }

    /// The current session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.current.value()
    }

    /// Observe the current session.
    ///
    /// `callback` runs immediately with the current value and again on every
    /// login and logout.
    pub fn subscribe(&self, callback: impl Fn(Option<&Session>) + 'static) -> SubscriptionId {
        self.current.subscribe(callback)
    }

    /// Stop observing. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.current.unsubscribe(id)
    }

    /// List registered accounts without their credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the collection cannot be read.
    pub fn accounts(&self) -> Result<Vec<AccountSummary>, AuthError> {
        Ok(self
            .accounts
            .list()?
            .iter()
            .map(Account::summary)
            .collect())
    }
}

impl AuthCheck for SessionManager<'_> {
    type Error = Infallible;

    fn is_authenticated(&self) -> Result<bool, Self::Error> {
        Ok(self.current.is_present())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
