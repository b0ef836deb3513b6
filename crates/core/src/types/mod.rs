//! Core types for Latchkey.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod route;

pub use email::{Email, EmailError};
pub use id::AccountId;
pub use route::Route;
