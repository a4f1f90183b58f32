//! Error types for the client layer.

use megamart_protocol::ValidationError;

/// The generic message shown when a login fails without a server message.
pub(crate) const LOGIN_FAILED: &str = "Invalid username or password";

/// Errors returned by [`ApiClient`](crate::ApiClient) and
/// [`Authorized`](crate::Authorized).
///
/// None of these change local state: a failed call leaves whatever the
/// caller had before untouched.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The login was rejected, or could not be completed at all.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The backend refused the credential (401) or the role (403).
    ///
    /// The session is not cleared automatically; a stale credential is
    /// only discovered this way.
    #[error("request not authorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-success status.
    #[error("request failed (HTTP {status})")]
    Status { status: u16, message: Option<String> },

    /// The request never produced a response, or the body did not decode.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A form failed a local check; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// `true` for 401/403, the only sign that a credential has gone stale.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The message to show the user in a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}
