//! Access guard for protected views.
//!
//! If the user is not authenticated, the guard requests navigation to the
//! login view and denies entry.
//!
//! # Example
//!
//! ```rust,ignore
//! let guard = AuthGuard::new(&manager, &navigator);
//! if guard.can_activate()? {
//!     dashboard.init();
//! }
//! ```

use latchkey_core::Route;

use crate::navigation::Navigator;

/// Source of the authentication predicate consulted by [`AuthGuard`].
///
/// Errors are not part of the guard's normal contract: the guard hands them
/// straight back to its caller instead of turning them into a redirect.
pub trait AuthCheck {
    /// Error raised when the predicate cannot be evaluated.
    type Error;

    /// Whether a session is present.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn is_authenticated(&self) -> Result<bool, Self::Error>;
}

/// Guard consulted before entering a protected route.
pub struct AuthGuard<'a, A: ?Sized> {
    auth: &'a A,
    navigator: &'a dyn Navigator,
}

impl<'a, A> AuthGuard<'a, A>
where
    A: AuthCheck + ?Sized,
{
    /// Create a guard over `auth`.
    #[must_use]
    pub const fn new(auth: &'a A, navigator: &'a dyn Navigator) -> Self {
        Self { auth, navigator }
    }

    /// Allow entry only with a session.
    ///
    /// Without one, navigation to the login view is requested and `false`
    /// returned. With one, nothing else happens.
    ///
    /// # Errors
    ///
    /// Propagates the predicate's error unchanged; no navigation happens.
    pub fn can_activate(&self) -> Result<bool, A::Error> {
        if self.auth.is_authenticated()? {
            return Ok(true);
        }

        tracing::debug!("Access denied; redirecting to login");
        self.navigator.navigate(Route::Login);
        Ok(false)
    }

    /// Check entry into `route`. Unprotected routes always pass.
    ///
    /// # Errors
    ///
    /// Same as [`can_activate`](Self::can_activate).
    pub fn check(&self, route: Route) -> Result<bool, A::Error> {
        if route.is_protected() {
            self.can_activate()
        } else {
            Ok(true)
        }
    }
}
