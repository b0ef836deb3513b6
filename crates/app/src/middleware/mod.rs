//! Navigation middleware.
//!
//! Checks run before a view is entered. Currently only the access guard,
//! which keeps unauthenticated users out of protected routes.

pub mod guard;

pub use guard::{AuthCheck, AuthGuard};
