//! View controllers.
//!
//! Each view owns its form-independent state (loading flag, last error
//! message, displayed user) and delegates to the [`SessionManager`].
//!
//! [`SessionManager`]: crate::services::auth::SessionManager

pub mod dashboard;
pub mod forms;
pub mod login;
pub mod register;

pub use dashboard::DashboardView;
pub use forms::{Field, FieldError, FormErrors, LoginForm, RegisterForm};
pub use login::LoginView;
pub use register::RegisterView;

use thiserror::Error;

use crate::services::auth::AuthError;

/// Why a form submission did not complete.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form failed validation; the manager was not called.
    #[error("{0}")]
    Invalid(FormErrors),

    /// The manager rejected the submission.
    #[error(transparent)]
    Auth(#[from] AuthError),
}
