//! Registration view.

use tracing::debug;

use super::SubmitError;
use super::forms::RegisterForm;
use crate::services::auth::SessionManager;

/// Controller behind the registration screen.
pub struct RegisterView<'m, 'a> {
    manager: &'m SessionManager<'a>,
    loading: bool,
    error_message: Option<String>,
}

impl<'m, 'a> RegisterView<'m, 'a> {
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
    /// An invalid form has every field marked touched and never reaches the
    /// manager. Otherwise the manager's error, if any, becomes the view's
    /// error message.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Invalid` for a form that fails validation.
    /// Returns `SubmitError::Auth` when registration is rejected.
    pub fn submit(&mut self, form: &mut RegisterForm) -> Result<(), SubmitError> {
        let errors = form.validate();
        if !errors.is_empty() {
            debug!(errors = %errors, "Registration form invalid");
            form.mark_all_touched();
            return Err(SubmitError::Invalid(errors));
        }

        self.loading = true;
        self.error_message = None;

        let result = self.manager.register(&form.to_registration());
        self.loading = false;

        result.map_err(|e| {
            self.error_message = Some(e.to_string());
            SubmitError::Auth(e)
        })
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed submission.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
