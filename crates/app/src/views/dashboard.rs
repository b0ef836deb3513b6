//! Dashboard view, the only protected screen.

use std::fmt::Write as _;

use crate::middleware::AuthGuard;
use crate::models::Session;
use crate::navigation::Navigator;
use crate::services::auth::SessionManager;

/// Controller behind the dashboard.
pub struct DashboardView<'m, 'a> {
    manager: &'m SessionManager<'a>,
    navigator: &'m dyn Navigator,
    user: Option<Session>,
}

impl<'m, 'a> DashboardView<'m, 'a> {
    #[must_use]
    pub const fn new(manager: &'m SessionManager<'a>, navigator: &'m dyn Navigator) -> Self {
        Self {
            manager,
            navigator,
            user: None,
        }
    }

    /// Load the signed-in user.
    ///
    /// Without a session, navigation to the login view is requested and no
    /// user is kept. Returns whether a user was loaded.
    pub fn init(&mut self) -> bool {
        let guard = AuthGuard::new(self.manager, self.navigator);
        let Ok(allowed) = guard.can_activate();

        self.user = if allowed {
            self.manager.current_session()
        } else {
            None
        };
        self.user.is_some()
    }

    /// End the session.
    pub fn logout(&mut self) {
        self.manager.logout();
        self.user = None;
    }

    /// The displayed user.
    #[must_use]
    pub const fn user(&self) -> Option<&Session> {
        self.user.as_ref()
    }

    /// Text rendering of the dashboard.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("Dashboard\n");
        match &self.user {
            Some(user) => {
                let _ = writeln!(out, "Welcome, {}!", user.full_name);
                let _ = writeln!(out, "Email: {}", user.email);
                let _ = writeln!(
                    out,
                    "Signed in: {}",
                    user.authenticated_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
            None => out.push_str("Not signed in\n"),
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use latchkey_core::Route;
    use secrecy::SecretString;

    use super::*;
    use crate::config::HashingConfig;
    use crate::navigation::HistoryNavigator;
    use crate::services::auth::{CredentialHasher, Registration};
    use crate::storage::MemoryStore;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(&HashingConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    fn signed_in(manager: &SessionManager<'_>) {
        manager
            .register(&Registration {
                full_name: "Test user".to_owned(),
                email: "testuser1@gmail.com".to_owned(),
                password: secret("password123"),
                confirm_password: secret("password123"),
            })
            .unwrap();
        manager
            .login("testuser1@gmail.com", &secret("password123"))
            .unwrap();
    }

    #[test]
    fn test_init_without_session_redirects() {
        let store = MemoryStore::new();
        let navigator = HistoryNavigator::new();
        let manager = SessionManager::new(&store, &navigator, hasher());
        let mut view = DashboardView::new(&manager, &navigator);

        assert!(!view.init());
        assert!(view.user().is_none());
        assert_eq!(navigator.history(), vec![Route::Login]);

        let rendered = view.render();
        assert!(rendered.contains("Not signed in"));
        assert!(!rendered.contains("Email:"));
    }

    #[test]
    fn test_init_with_session_shows_user() {
        let store = MemoryStore::new();
        let navigator = HistoryNavigator::new();
        let manager = SessionManager::new(&store, &navigator, hasher());
        signed_in(&manager);
        navigator.clear();

        let mut view = DashboardView::new(&manager, &navigator);
        assert!(view.init());
        assert!(navigator.history().is_empty());

        let rendered = view.render();
        assert!(rendered.contains("Welcome, Test user!"));
        assert!(rendered.contains("Email: testuser1@gmail.com"));
    }

    #[test]
    fn test_logout_delegates_to_manager() {
        let store = MemoryStore::new();
        let navigator = HistoryNavigator::new();
        let manager = SessionManager::new(&store, &navigator, hasher());
        signed_in(&manager);

        let mut view = DashboardView::new(&manager, &navigator);
        view.init();
        view.logout();

        assert!(view.user().is_none());
        assert!(!manager.is_authenticated());
        assert_eq!(navigator.current(), Some(Route::Login));
    }
}
