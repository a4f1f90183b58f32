//! The session record: the client's view of who is logged in.
//!
//! A session tracks:
//! - WHO is calling the backend (the bearer [`Credential`])
//! - WHAT they may do (their [`Role`])
//! - WHETHER the one-time restore from the store is still running

use megamart_protocol::{Credential, Role};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The process-wide authenticated-actor record.
///
/// Only [`AuthSessionManager`](crate::AuthSessionManager) constructs and
/// mutates sessions. Everyone else gets a snapshot (`Clone`) or a watch
/// receiver, so a reader can never hold a copy that drifts from the
/// manager's.
///
/// ```text
///   [Restoring] ──(restore)──→ [Signed out] ⇄ [Signed in]
///                                      (login / logout)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The bearer token, present once logged in.
    pub credential: Option<Credential>,

    /// The role reported at login. `None` when signed out, or when a
    /// restored role tag was not recognised.
    pub role: Option<Role>,

    /// `true` only until the one-time restore has run. Never goes back
    /// to `true` afterwards.
    pub loading: bool,
}

impl Session {
    /// The state at process start, before the store has been read.
    pub fn restoring() -> Self {
        Self {
            credential: None,
            role: None,
            loading: true,
        }
    }

    /// The unauthenticated state after restore or logout.
    pub fn signed_out() -> Self {
        Self {
            credential: None,
            role: None,
            loading: false,
        }
    }

    /// `true` iff a non-empty credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.credential.as_ref().is_some_and(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restoring_is_loading_and_unauthenticated() {
        let session = Session::restoring();

        assert!(session.loading);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_is_authenticated_empty_credential_is_false() {
        let session = Session {
            credential: Some(Credential::new("")),
            role: Some(Role::Admin),
            loading: false,
        };

        assert!(!session.is_authenticated());
    }
}
