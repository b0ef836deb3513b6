//! Latchkey application library.
//!
//! Local account registration and login backed by a persisted key-value
//! store, a session manager that survives restarts, an access guard for
//! protected views, and the view controllers that drive them.
//!
//! # Modules
//!
//! - [`storage`] - key-value backends (memory, profile directory)
//! - [`db`] - account and session repositories over a store
//! - [`services`] - session manager, password hashing, session channel
//! - [`middleware`] - access guard
//! - [`views`] - forms and view controllers
//! - [`navigation`] - navigation requests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod services;
pub mod storage;
pub mod views;

pub use error::AppError;
