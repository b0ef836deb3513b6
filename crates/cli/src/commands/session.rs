//! Read-only commands over the current profile.

use latchkey_app::AppError;
use latchkey_app::navigation::Navigator;
use latchkey_app::services::auth::SessionManager;
use latchkey_app::views::DashboardView;

/// Show the current session.
#[allow(clippy::print_stdout)]
pub fn status(manager: &SessionManager<'_>) {
    match manager.current_session() {
        Some(session) => {
            println!("Signed in as {} <{}>", session.full_name, session.email);
            println!(
                "Since {}",
                session.authenticated_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        None => println!("Not signed in."),
    }
}

/// Open the dashboard through the access guard.
#[allow(clippy::print_stdout)]
pub fn dashboard(manager: &SessionManager<'_>, navigator: &dyn Navigator) {
    let mut view = DashboardView::new(manager, navigator);
    if !view.init() {
        tracing::info!("Dashboard requires a session");
    }
    print!("{}", view.render());
}

/// List registered accounts.
///
/// # Errors
///
/// Returns `AppError::Auth` if the account collection cannot be read.
#[allow(clippy::print_stdout)]
pub fn accounts(manager: &SessionManager<'_>) -> Result<(), AppError> {
    let accounts = manager.accounts()?;
    if accounts.is_empty() {
        println!("No accounts registered.");
        return Ok(());
    }

    for account in accounts {
        println!(
            "{}  {} <{}>  registered {}",
            account.id,
            account.full_name,
            account.email,
            account.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}
