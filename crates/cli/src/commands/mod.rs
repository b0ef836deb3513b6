//! CLI command implementations.

pub mod auth;
pub mod session;

use latchkey_app::AppError;
use latchkey_app::navigation::HistoryNavigator;
use latchkey_core::Route;

/// Print the last navigation requested during the command, if any.
#[allow(clippy::print_stdout)]
pub fn report_navigation(navigator: &HistoryNavigator) {
    if let Some(line) = navigation_line(navigator.current()) {
        println!("{line}");
    }
}

/// The report line for a requested route.
#[must_use]
pub fn navigation_line(route: Option<Route>) -> Option<String> {
    route.map(|route| format!("-> {route}"))
}

/// Print the user-facing message for a failed command.
#[allow(clippy::print_stderr)]
pub fn report_failure(err: &AppError) {
    match err {
        AppError::Invalid(errors) => {
            eprintln!("Invalid input:");
            for (field, error) in errors.fields() {
                eprintln!("  {} {error}", field.label());
            }
            if errors.mismatch() {
                eprintln!("  Passwords do not match");
            }
        }
        other => eprintln!("Error: {other}"),
    }
}
