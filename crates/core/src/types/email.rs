//! Account email addresses.
//!
//! The email is the login key for an account, so equality is exact: no case
//! folding, no trimming. `User@Example.com` and `user@example.com` are two
//! different accounts.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string was rejected as an account email.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The string is empty.
    #[error("email address is empty")]
    Empty,

    /// Longer than [`Email::MAX_LENGTH`] characters.
    #[error("email address exceeds {max} characters")]
    TooLong {
        /// The limit that was exceeded.
        max: usize,
    },

    /// No `@` separator.
    #[error("email address has no '@'")]
    MissingAtSymbol,

    /// Nothing before the `@`.
    #[error("nothing before '@' in email address")]
    EmptyLocalPart,

    /// Nothing after the first `@`.
    #[error("nothing after '@' in email address")]
    EmptyDomain,
}

/// An account email address.
///
/// Only the structural minimum is checked: something on both sides of an
/// `@`, at most 254 characters. The stricter syntax rule applied by the
/// registration and login forms lives in the form layer.
///
/// Deserialization goes through [`Email::parse`], so a persisted record with
/// a malformed email fails to load.
///
/// ```
/// use latchkey_core::Email;
///
/// assert!(Email::parse("testuser1@gmail.com").is_ok());
/// assert!(Email::parse("testuser1").is_err());
///
/// // Case matters: these are distinct login keys.
/// let a = Email::parse("Test@gmail.com").unwrap();
/// let b = Email::parse("test@gmail.com").unwrap();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Upper bound on length, in characters.
    pub const MAX_LENGTH: usize = 254;

    /// Validate `s` as an account email.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found, checked in the order the
    /// [`EmailError`] variants are declared.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.chars().count() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match s.split_once('@') {
            None => Err(EmailError::MissingAtSymbol),
            Some(("", _)) => Err(EmailError::EmptyLocalPart),
            Some((_, "")) => Err(EmailError::EmptyDomain),
            Some(_) => Ok(Self(s.to_owned())),
        }
    }

    /// The address as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned address.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
