//! The role-scoped view router: guard first, then the access table.

use megamart_session::Session;

use crate::{Destination, GuardDecision, RouteGuard, access};

/// What to do with one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Session restore is still running; show nothing yet.
    Defer,
    /// Show the requested screen.
    Render(Destination),
    /// Go somewhere else instead, without an error message.
    Redirect(Destination),
}

impl Navigation {
    /// Pure resolution against a session snapshot.
    ///
    /// - Login is public and always renders.
    /// - Otherwise the guard decides: Pending defers, Deny redirects to
    ///   login.
    /// - On Allow, a role blocked from the screen is sent home.
    pub fn resolve(session: &Session, requested: Destination) -> Self {
        if !requested.is_protected() {
            return Self::Render(requested);
        }
        match GuardDecision::for_session(session) {
            GuardDecision::Pending => Self::Defer,
            GuardDecision::Deny => Self::Redirect(Destination::Login),
            GuardDecision::Allow if access::can_reach(session.role, requested) => {
                Self::Render(requested)
            }
            GuardDecision::Allow => Self::Redirect(Destination::Home),
        }
    }

    /// The screen that ends up on display, if any.
    pub fn target(self) -> Option<Destination> {
        match self {
            Self::Defer => None,
            Self::Render(d) | Self::Redirect(d) => Some(d),
        }
    }
}

/// Routes navigation requests against the live session.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    guard: RouteGuard,
}

impl ViewRouter {
    pub fn new(guard: RouteGuard) -> Self {
        Self { guard }
    }

    /// Resolves `requested` against the session as it is right now.
    pub fn navigate(&self, requested: Destination) -> Navigation {
        let navigation = Navigation::resolve(&self.guard.session(), requested);
        log_navigation(requested, navigation);
        navigation
    }

    /// Like [`navigate`](Self::navigate), but waits for session restore
    /// instead of returning [`Navigation::Defer`].
    pub async fn navigate_settled(&mut self, requested: Destination) -> Navigation {
        if requested.is_protected() {
            self.guard.settled().await;
        }
        self.navigate(requested)
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }
}

fn log_navigation(requested: Destination, navigation: Navigation) {
    match navigation {
        Navigation::Defer => tracing::debug!(%requested, "navigation deferred, session restoring"),
        Navigation::Render(_) => tracing::debug!(%requested, "rendering"),
        Navigation::Redirect(to) => tracing::debug!(%requested, %to, "redirecting"),
    }
}

#[cfg(test)]
mod tests {
    use megamart_protocol::{Credential, Role};

    use super::*;

    fn signed_in(role: Option<Role>) -> Session {
        Session {
            credential: Some(Credential::new("abc")),
            role,
            loading: false,
        }
    }

    #[test]
    fn test_resolve_loading_defers_protected() {
        for dest in Destination::ALL.into_iter().filter(|d| d.is_protected()) {
            assert_eq!(Navigation::resolve(&Session::restoring(), dest), Navigation::Defer);
        }
    }

    #[test]
    fn test_resolve_loading_still_renders_login() {
        assert_eq!(
            Navigation::resolve(&Session::restoring(), Destination::Login),
            Navigation::Render(Destination::Login)
        );
    }

    #[test]
    fn test_resolve_signed_out_redirects_to_login() {
        for dest in Destination::ALL.into_iter().filter(|d| d.is_protected()) {
            assert_eq!(
                Navigation::resolve(&Session::signed_out(), dest),
                Navigation::Redirect(Destination::Login),
                "{dest}"
            );
        }
    }

    #[test]
    fn test_resolve_cashier_sent_home_from_category() {
        assert_eq!(
            Navigation::resolve(&signed_in(Some(Role::Cashier)), Destination::Category),
            Navigation::Redirect(Destination::Home)
        );
    }

    #[test]
    fn test_resolve_roleless_session_renders_home() {
        assert_eq!(
            Navigation::resolve(&signed_in(None), Destination::Home),
            Navigation::Render(Destination::Home)
        );
        assert_eq!(
            Navigation::resolve(&signed_in(None), Destination::Stock),
            Navigation::Redirect(Destination::Home)
        );
    }

    #[test]
    fn test_target_defer_is_none() {
        assert_eq!(Navigation::Defer.target(), None);
        assert_eq!(
            Navigation::Redirect(Destination::Home).target(),
            Some(Destination::Home)
        );
    }
}
