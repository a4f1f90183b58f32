//! Error types for the router layer.

use crate::Destination;

/// Errors produced while parsing a destination or checking an action.
///
/// A blocked *navigation* is never an error: it is a silent redirect
/// (see [`Navigation::Redirect`](crate::Navigation::Redirect)).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// The name or path does not match any screen.
    #[error("unknown destination: {0:?}")]
    UnknownDestination(String),

    /// The role may not perform this in-screen action. The message is
    /// shown inline to the user.
    #[error("{message}")]
    Forbidden {
        destination: Destination,
        message: &'static str,
    },
}
