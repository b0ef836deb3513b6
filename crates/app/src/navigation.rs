//! Navigation requests.
//!
//! The core never renders views; it asks a [`Navigator`] to switch to one.
//! Whatever hosts the views (the CLI, a test) decides what that means.

use std::cell::RefCell;

use latchkey_core::Route;

/// Receives navigation requests from the session manager, guard, and views.
pub trait Navigator {
    /// Request a switch to `route`.
    fn navigate(&self, route: Route);
}

/// A [`Navigator`] that records every request in order.
///
/// The CLI uses it to report where an action would have taken the user.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: RefCell<Vec<Route>>,
}

impl HistoryNavigator {
    /// Create a navigator with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently requested route.
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.history.borrow().last().copied()
    }

    /// Every requested route, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.history.borrow().clone()
    }

    /// Forget all recorded requests.
    pub fn clear(&self) {
        self.history.borrow_mut().clear();
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "Navigation requested");
        self.history.borrow_mut().push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let navigator = HistoryNavigator::new();
        assert_eq!(navigator.current(), None);

        navigator.navigate(Route::Login);
        navigator.navigate(Route::Dashboard);

        assert_eq!(navigator.current(), Some(Route::Dashboard));
        assert_eq!(navigator.history(), vec![Route::Login, Route::Dashboard]);

        navigator.clear();
        assert!(navigator.history().is_empty());
    }
}
