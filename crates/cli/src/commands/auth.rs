//! Account and session commands.
//!
//! Input goes through the same forms and views as any other front end, so
//! validation rules apply before the session manager is called.

use secrecy::SecretString;

use latchkey_app::AppError;
use latchkey_app::services::auth::SessionManager;
use latchkey_app::views::{LoginForm, LoginView, RegisterForm, RegisterView};

/// Register a new account.
///
/// # Errors
///
/// Returns `AppError::Invalid` if the form fails validation.
/// Returns `AppError::Auth` if registration is rejected.
#[allow(clippy::print_stdout)]
pub fn register(
    manager: &SessionManager<'_>,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<(), AppError> {
    let mut form = RegisterForm {
        full_name: name,
        email,
        password: SecretString::from(password),
        confirm_password: SecretString::from(confirm_password),
        ..RegisterForm::default()
    };

    RegisterView::new(manager).submit(&mut form)?;

    println!("Registered {}. You can now log in.", form.email);
    Ok(())
}

/// Log in.
///
/// # Errors
///
/// Returns `AppError::Invalid` if the form fails validation.
/// Returns `AppError::Auth` if the credentials are rejected.
#[allow(clippy::print_stdout)]
pub fn login(manager: &SessionManager<'_>, email: String, password: String) -> Result<(), AppError> {
    let mut form = LoginForm {
        email,
        password: SecretString::from(password),
        ..LoginForm::default()
    };

    LoginView::new(manager).submit(&mut form)?;

    if let Some(session) = manager.current_session() {
        println!("Logged in as {} <{}>", session.full_name, session.email);
    }
    Ok(())
}

/// Log out. Succeeds with or without a session.
#[allow(clippy::print_stdout)]
pub fn logout(manager: &SessionManager<'_>) {
    let was_authenticated = manager.is_authenticated();
    manager.logout();

    if was_authenticated {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
}
