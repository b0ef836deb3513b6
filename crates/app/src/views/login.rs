//! Login view.

use tracing::debug;

use super::SubmitError;
use super::forms::LoginForm;
use crate::services::auth::SessionManager;

/// Controller behind the login screen.
pub struct LoginView<'m, 'a> {
    manager: &'m SessionManager<'a>,
    loading: bool,
    error_message: Option<String>,
}

impl<'m, 'a> LoginView<'m, 'a> {
    #[must_use]
    pub const fn new(manager: &'m SessionManager<'a>) -> Self {
        Self {
            manager,
            loading: false,
            error_message: None,
        }
    }

    /// Submit the form.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Invalid` for a form that fails validation; the
    /// manager is not called. Returns `SubmitError::Auth` when login is
    /// rejected.
    pub fn submit(&mut self, form: &mut LoginForm) -> Result<(), SubmitError> {
        let errors = form.validate();
        if !errors.is_empty() {
            debug!(errors = %errors, "Login form invalid");
            form.mark_all_touched();
            return Err(SubmitError::Invalid(errors));
        }

        self.loading = true;
        self.error_message = None;

        let result = self.manager.login(&form.email, &form.password);
        self.loading = false;

        result.map_err(|e| {
            self.error_message = Some(e.to_string());
            SubmitError::Auth(e)
        })
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
