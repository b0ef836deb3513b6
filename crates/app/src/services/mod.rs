//! Business logic services.
//!
//! - [`auth`] - registration, login, logout, and the current session
//! - [`channel`] - replay-latest broadcast of the current session

pub mod auth;
pub mod channel;
