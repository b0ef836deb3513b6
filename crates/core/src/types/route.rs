//! View routes.

use core::fmt;

/// A view the navigator can be asked to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Entry view; destination of every unauthenticated redirect.
    Login,
    /// Account creation form.
    Register,
    /// Protected view; requires a session.
    Dashboard,
}

impl Route {
    /// Returns the path identifier of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
        }
    }

    /// Whether entering this route requires an authenticated session.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
