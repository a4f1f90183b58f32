//! The auth session manager: sole owner and writer of the [`Session`].
//!
//! Responsibilities:
//! - Restoring the session from the store once, at start-up
//! - Applying a successful login and writing it through to the store
//! - Logging out, in memory and in the store
//! - Handing out read-only snapshots and watch receivers
//!
//! # Concurrency note
//!
//! Mutations take `&mut self`, so the borrow checker guarantees a single
//! writer. Readers go through a `tokio::sync::watch` channel: a receiver
//! always sees the latest session on its next `borrow()`, and an async
//! view can `changed().await` to react to login or logout.

use megamart_protocol::{LoginResponse, Role};
use tokio::sync::watch;

use crate::{Session, SessionStore, StoredSession};

/// Owns the session and bridges the [`SessionStore`] to the rest of the
/// client.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ restore() ──→ login() ⇄ logout()
///   │           │
///   ▼           ▼
/// [loading]  [loading = false, for good]
/// ```
///
/// The manager never reports errors. Store failures are logged and
/// absorbed: the in-memory session is still updated, so the current
/// process behaves correctly even when the record could not be persisted.
pub struct AuthSessionManager<S: SessionStore> {
    store: S,

    /// The single source of truth. The sender side is private, so only
    /// this manager can publish a new session.
    session: watch::Sender<Session>,

    /// Set once `restore()` has run.
    restored: bool,
}

impl<S: SessionStore> AuthSessionManager<S> {
    /// Creates a manager in the loading state. Call [`restore`](Self::restore)
    /// before making any navigation decision.
    pub fn new(store: S) -> Self {
        let (session, _) = watch::channel(Session::restoring());
        Self {
            store,
            session,
            restored: false,
        }
    }

    /// Reads the store and leaves the loading state.
    ///
    /// If a non-empty credential is stored, the session becomes
    /// authenticated with it. A stored role tag that is not a known role
    /// is dropped, leaving an authenticated session with no role. In
    /// every case `loading` ends up `false`.
    ///
    /// Only the first call does anything.
    pub fn restore(&mut self) {
        if self.restored {
            tracing::debug!("session already restored, ignoring");
            return;
        }
        self.restored = true;

        let stored = match self.store.get() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "could not read session store, starting signed out");
                StoredSession::default()
            }
        };

        let credential = stored.credential.filter(|c| !c.is_empty());
        let role = match (&credential, stored.role) {
            (Some(_), Some(tag)) => match tag.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring stored role");
                    None
                }
            },
            _ => None,
        };

        match (&credential, role) {
            (Some(_), Some(role)) => tracing::info!(%role, "session restored"),
            (Some(_), None) => tracing::info!("session restored without a role"),
            (None, _) => tracing::info!("no stored session"),
        }

        self.session.send_modify(|session| {
            session.credential = credential;
            session.role = role;
            // Last, so no observer sees `loading == false` with stale fields.
            session.loading = false;
        });
    }

    /// Applies a successful login and persists it.
    ///
    /// The response is assumed to come from a successful `POST /login`;
    /// rejected logins never reach this method. A response carrying an
    /// empty credential is ignored, since it could never authenticate. A
    /// response without a recognised role still logs in, with no role,
    /// exactly as a restore of an unknown stored tag would.
    pub fn login(&mut self, response: LoginResponse) {
        let LoginResponse { credential, role } = response;
        if credential.is_empty() {
            tracing::warn!("login response carried an empty credential, ignoring");
            return;
        }

        if let Err(e) = self.store.put(&credential, role) {
            tracing::warn!(error = %e, "could not persist session");
        }

        self.session.send_modify(|session| {
            session.credential = Some(credential);
            session.role = role;
        });
        match role {
            Some(role) => tracing::info!(%role, "logged in"),
            None => tracing::warn!("logged in without a recognised role"),
        }
    }

    /// Clears the session in memory and in the store.
    ///
    /// Calling this while already logged out leaves the same end state.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "could not clear session store");
        }

        let was_authenticated = self.session.borrow().is_authenticated();
        self.session.send_modify(|session| {
            session.credential = None;
            session.role = None;
        });
        if was_authenticated {
            tracing::info!("logged out");
        }
    }

    /// A read-only snapshot of the current session.
    pub fn current(&self) -> Session {
        self.session.borrow().clone()
    }

    /// A receiver that always observes the latest session.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    /// `true` once [`restore`](Self::restore) has run.
    pub fn is_restored(&self) -> bool {
        self.restored
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `AuthSessionManager`, named
    //! `test_{function}_{scenario}_{expected}`.
    //!
    //! Each test keeps a clone of the `MemoryStore` so it can check what
    //! was persisted independently of the manager's in-memory state.

    use megamart_protocol::Credential;

    use super::*;
    use crate::{MemoryStore, ROLE_KEY, StoreError, TOKEN_KEY};

    // -- Helpers ----------------------------------------------------------

    fn response(token: &str, role: Role) -> LoginResponse {
        LoginResponse {
            credential: Credential::new(token),
            role: Some(role),
        }
    }

    fn restored_manager(store: MemoryStore) -> AuthSessionManager<MemoryStore> {
        let mut mgr = AuthSessionManager::new(store);
        mgr.restore();
        mgr
    }

    /// A store whose every operation fails, for the absorb-and-log paths.
    struct BrokenStore;

    fn broken() -> StoreError {
        StoreError::Io {
            path: "/dev/full".into(),
            source: std::io::Error::other("disk full"),
        }
    }

    impl SessionStore for BrokenStore {
        fn put(&mut self, _: &Credential, _: Option<Role>) -> Result<(), StoreError> {
            Err(broken())
        }
        fn get(&self) -> Result<StoredSession, StoreError> {
            Err(broken())
        }
        fn clear(&mut self) -> Result<(), StoreError> {
            Err(broken())
        }
    }

    // =====================================================================
    // new() / restore()
    // =====================================================================

    #[test]
    fn test_new_is_loading_until_restore() {
        let mgr = AuthSessionManager::new(MemoryStore::new());

        assert!(mgr.current().loading);
        assert!(!mgr.is_restored());
    }

    #[test]
    fn test_restore_empty_store_is_signed_out() {
        let mgr = restored_manager(MemoryStore::new());

        let session = mgr.current();
        assert!(!session.is_authenticated());
        assert!(!session.loading);
    }

    #[test]
    fn test_restore_stored_pair_is_authenticated() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc"), (ROLE_KEY, "manager")]);

        let session = restored_manager(store).current();

        assert!(session.is_authenticated());
        assert_eq!(session.credential, Some(Credential::new("abc")));
        assert_eq!(session.role, Some(Role::Manager));
        assert!(!session.loading);
    }

    #[test]
    fn test_restore_unknown_role_keeps_credential_without_role() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc"), (ROLE_KEY, "superuser")]);

        let session = restored_manager(store).current();

        assert!(session.is_authenticated());
        assert_eq!(session.role, None);
    }

    #[test]
    fn test_restore_empty_token_is_signed_out() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, ""), (ROLE_KEY, "admin")]);

        let session = restored_manager(store).current();

        assert!(!session.is_authenticated());
        assert_eq!(session.role, None);
    }

    #[test]
    fn test_restore_second_call_does_not_reread_store() {
        let mut store = MemoryStore::new();
        let mut mgr = restored_manager(store.clone());
        store.put(&Credential::new("late"), Some(Role::Admin)).unwrap();

        mgr.restore();

        assert!(!mgr.current().is_authenticated());
    }

    #[test]
    fn test_restore_unreadable_store_is_signed_out() {
        let mut mgr = AuthSessionManager::new(BrokenStore);

        mgr.restore();

        assert!(!mgr.current().loading);
        assert!(!mgr.current().is_authenticated());
    }

    // =====================================================================
    // login()
    // =====================================================================

    #[test]
    fn test_login_sets_session_and_persists() {
        let store = MemoryStore::new();
        let mut mgr = restored_manager(store.clone());

        mgr.login(response("abc", Role::Admin));

        let session = mgr.current();
        assert!(session.is_authenticated());
        assert_eq!(session.credential, Some(Credential::new("abc")));
        assert_eq!(session.role, Some(Role::Admin));

        let stored = store.get().unwrap();
        assert_eq!(stored.credential, Some(Credential::new("abc")));
        assert_eq!(stored.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_login_is_seen_by_later_process() {
        let store = MemoryStore::new();
        restored_manager(store.clone()).login(response("abc", Role::Cashier));

        let session = restored_manager(store).current();

        assert_eq!(session.role, Some(Role::Cashier));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_login_empty_credential_is_ignored() {
        let store = MemoryStore::new();
        let mut mgr = restored_manager(store.clone());

        mgr.login(response("  ", Role::Admin));

        assert!(!mgr.current().is_authenticated());
        assert_eq!(store.get().unwrap(), StoredSession::default());
    }

    #[test]
    fn test_login_without_role_signs_in_roleless() {
        let store = MemoryStore::new();
        let mut mgr = restored_manager(store.clone());

        mgr.login(LoginResponse {
            credential: Credential::new("abc"),
            role: None,
        });

        let session = mgr.current();
        assert!(session.is_authenticated());
        assert_eq!(session.role, None);
        assert_eq!(restored_manager(store).current(), session);
    }

    #[test]
    fn test_login_store_failure_still_signs_in() {
        let mut mgr = AuthSessionManager::new(BrokenStore);
        mgr.restore();

        mgr.login(response("abc", Role::Store));

        assert!(mgr.current().is_authenticated());
    }

    // =====================================================================
    // logout()
    // =====================================================================

    #[test]
    fn test_logout_clears_memory_and_store() {
        let store = MemoryStore::new();
        let mut mgr = restored_manager(store.clone());
        mgr.login(response("abc", Role::Admin));

        mgr.logout();

        let session = mgr.current();
        assert!(!session.is_authenticated());
        assert_eq!(session.credential, None);
        assert_eq!(session.role, None);
        assert_eq!(store.get().unwrap(), StoredSession::default());
    }

    #[test]
    fn test_logout_twice_matches_once() {
        let once_store = MemoryStore::new();
        let mut once = restored_manager(once_store.clone());
        once.login(response("abc", Role::Admin));
        once.logout();

        let twice_store = MemoryStore::new();
        let mut twice = restored_manager(twice_store.clone());
        twice.login(response("abc", Role::Admin));
        twice.logout();
        twice.logout();

        assert_eq!(once.current(), twice.current());
        assert_eq!(once_store.get().unwrap(), twice_store.get().unwrap());
    }

    #[test]
    fn test_logout_keeps_loading_cleared() {
        let mut mgr = restored_manager(MemoryStore::new());
        mgr.login(response("abc", Role::User));

        mgr.logout();

        assert!(!mgr.current().loading);
    }

    // =====================================================================
    // subscribe()
    // =====================================================================

    #[test]
    fn test_subscribe_observes_login_and_logout() {
        let mut mgr = restored_manager(MemoryStore::new());
        let rx = mgr.subscribe();

        mgr.login(response("abc", Role::Manager));
        assert!(rx.borrow().is_authenticated());

        mgr.logout();
        assert!(!rx.borrow().is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribe_changed_fires_on_restore() {
        let mut mgr = AuthSessionManager::new(MemoryStore::new());
        let mut rx = mgr.subscribe();
        assert!(rx.borrow_and_update().loading);

        mgr.restore();

        rx.changed().await.expect("sender alive");
        assert!(!rx.borrow().loading);
    }
}
