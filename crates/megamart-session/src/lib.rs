//! Session management for the MegaMart back-office client.
//!
//! This crate owns the answer to "who is logged in on this client?":
//!
//! 1. **Authentication** — exchanging a username and password for a
//!    credential ([`Authenticator`] trait)
//! 2. **Persistence** — keeping that credential across restarts
//!    ([`SessionStore`], with [`MemoryStore`] and [`FileStore`])
//! 3. **Session state** — the single in-memory record every view reads
//!    ([`AuthSessionManager`], [`Session`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Router (above)   ← reads the session to allow, deny, or defer a view
//!     ↕
//! Session (this crate)  ← restores, logs in, logs out
//!     ↕
//! Protocol (below) ← Credential, Role, LoginResponse
//! ```

mod auth;
mod error;
mod manager;
mod session;
mod store;

pub use auth::Authenticator;
pub use error::{SessionError, StoreError};
pub use manager::AuthSessionManager;
pub use session::Session;
pub use store::{FileStore, MemoryStore, ROLE_KEY, SessionStore, StoredSession, TOKEN_KEY};
