//! Unified error type for the back-office client.

use megamart_client::ClientError;
use megamart_protocol::ValidationError;
use megamart_router::RouterError;
use megamart_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `megamart` crate you deal with this single error type
/// instead of importing errors from each layer. The `#[from]` attribute
/// on each variant generates the `From` impl, so `?` converts layer errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum MegamartError {
    /// A form failed a local check before anything was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Login was rejected.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A resource call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Unknown destination, or an action the role may not perform.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// A resource call was requested with nobody logged in.
    #[error("not logged in")]
    NotAuthenticated,
}

impl MegamartError {
    /// The message to show the user in a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Client(e) => e.user_message(),
            Self::Session(SessionError::AuthFailed(message)) => message.clone(),
            other => other.to_string(),
        }
    }
}
