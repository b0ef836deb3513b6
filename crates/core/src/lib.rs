//! Latchkey Core - Shared types library.
//!
//! This crate provides common types used across all Latchkey components:
//! - `app` - Credential store, session manager, access guard, and views
//! - `cli` - Command-line front end that drives the views against a profile
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no hashing. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for account IDs, emails, and view routes

#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(missing_docs)]

pub mod types;

pub use types::*;
