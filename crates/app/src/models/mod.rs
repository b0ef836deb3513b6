//! Domain models.
//!
//! - [`account`] - registered accounts as persisted under the `users` key
//! - [`session`] - the credential-free copy persisted under `currentUser`

pub mod account;
pub mod session;

pub use account::{Account, AccountSummary};
pub use session::Session;
