//! The route guard: a three-state gate evaluated on every navigation.

use megamart_session::Session;
use tokio::sync::watch;

// ---------------------------------------------------------------------------
// GuardDecision
// ---------------------------------------------------------------------------

/// The outcome of the guard for one navigation.
///
/// ```text
///   Pending ──(restore done)──→ Deny   (nobody logged in → login screen)
///                          └──→ Allow  (render the destination)
/// ```
///
/// Deny and Allow are terminal for one navigation; the next navigation
/// is evaluated fresh. There is no timeout: if restore never runs, every
/// navigation stays Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Restore hasn't finished. Render nothing yet.
    Pending,
    /// Restore finished and nobody is logged in.
    Deny,
    /// Restore finished and the session is authenticated.
    Allow,
}

impl GuardDecision {
    /// Pure decision for a session snapshot.
    ///
    /// `loading` is checked first, so a session that is still restoring
    /// never yields Allow or Deny.
    pub fn for_session(session: &Session) -> Self {
        if session.loading {
            Self::Pending
        } else if session.is_authenticated() {
            Self::Allow
        } else {
            Self::Deny
        }
    }
}

// ---------------------------------------------------------------------------
// RouteGuard
// ---------------------------------------------------------------------------

/// A guard bound to the live session.
///
/// Holds a watch receiver obtained from
/// [`AuthSessionManager::subscribe`](megamart_session::AuthSessionManager::subscribe),
/// so every decision reads the manager's current session, never a stale
/// copy.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: watch::Receiver<Session>,
}

impl RouteGuard {
    pub fn new(session: watch::Receiver<Session>) -> Self {
        Self { session }
    }

    /// Decides against the latest session without waiting.
    pub fn decide(&self) -> GuardDecision {
        GuardDecision::for_session(&self.session.borrow())
    }

    /// Waits until restore has finished, then decides.
    ///
    /// If the session manager is dropped while still loading, the guard
    /// stays Pending.
    pub async fn settled(&mut self) -> GuardDecision {
        match self.session.wait_for(|session| !session.loading).await {
            Ok(session) => GuardDecision::for_session(&session),
            Err(_) => GuardDecision::Pending,
        }
    }

    /// A snapshot of the session the guard is looking at.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use megamart_protocol::{Credential, LoginResponse, Role};
    use megamart_session::{AuthSessionManager, MemoryStore, ROLE_KEY, TOKEN_KEY};

    use super::*;

    fn signed_in(role: Role) -> Session {
        Session {
            credential: Some(Credential::new("abc")),
            role: Some(role),
            loading: false,
        }
    }

    // =====================================================================
    // for_session()
    // =====================================================================

    #[test]
    fn test_for_session_loading_is_pending_even_with_credential() {
        let session = Session {
            loading: true,
            ..signed_in(Role::Admin)
        };

        assert_eq!(GuardDecision::for_session(&session), GuardDecision::Pending);
    }

    #[test]
    fn test_for_session_signed_out_is_deny() {
        assert_eq!(
            GuardDecision::for_session(&Session::signed_out()),
            GuardDecision::Deny
        );
    }

    #[test]
    fn test_for_session_signed_in_is_allow() {
        assert_eq!(
            GuardDecision::for_session(&signed_in(Role::Cashier)),
            GuardDecision::Allow
        );
    }

    // =====================================================================
    // RouteGuard
    // =====================================================================

    #[test]
    fn test_decide_before_restore_is_pending() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc"), (ROLE_KEY, "admin")]);
        let mgr = AuthSessionManager::new(store);
        let guard = RouteGuard::new(mgr.subscribe());

        assert_eq!(guard.decide(), GuardDecision::Pending);
    }

    #[test]
    fn test_decide_follows_login_and_logout() {
        let mut mgr = AuthSessionManager::new(MemoryStore::new());
        let guard = RouteGuard::new(mgr.subscribe());
        mgr.restore();
        assert_eq!(guard.decide(), GuardDecision::Deny);

        mgr.login(LoginResponse {
            credential: Credential::new("abc"),
            role: Some(Role::Store),
        });
        assert_eq!(guard.decide(), GuardDecision::Allow);

        mgr.logout();
        assert_eq!(guard.decide(), GuardDecision::Deny);
    }

    #[tokio::test]
    async fn test_settled_waits_for_restore() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc"), (ROLE_KEY, "store")]);
        let mut mgr = AuthSessionManager::new(store);
        let mut guard = RouteGuard::new(mgr.subscribe());

        let waiter = tokio::spawn(async move { guard.settled().await });
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        mgr.restore();

        assert_eq!(waiter.await.unwrap(), GuardDecision::Allow);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_without_restore_never_decides() {
        let mgr = AuthSessionManager::new(MemoryStore::new());
        let mut guard = RouteGuard::new(mgr.subscribe());

        let result = tokio::time::timeout(Duration::from_secs(60), guard.settled()).await;

        assert!(result.is_err(), "guard must stay pending without restore");
        drop(mgr);
    }

    #[tokio::test]
    async fn test_settled_manager_dropped_while_loading_is_pending() {
        let mgr = AuthSessionManager::new(MemoryStore::new());
        let mut guard = RouteGuard::new(mgr.subscribe());
        drop(mgr);

        assert_eq!(guard.settled().await, GuardDecision::Pending);
    }
}
