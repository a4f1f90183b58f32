//! Error types for the session layer.

use std::path::PathBuf;

use megamart_protocol::ProtocolError;

/// Errors that can occur while establishing a session.
///
/// Note that the [`AuthSessionManager`](crate::AuthSessionManager) itself
/// never returns these: it only changes state. They come from the
/// [`Authenticator`](crate::Authenticator).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backend rejected the login. The message is shown to the user
    /// as-is.
    #[error("authentication failed: {0}")]
    AuthFailed(String),
}

/// Errors raised by a [`SessionStore`](crate::SessionStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading, writing, or removing the backing file failed.
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a session record.
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] ProtocolError),
}
