//! Error types for the protocol layer.
//!
//! Each crate in the workspace defines its own error enum. A
//! `ProtocolError` always means the problem is in (de)serialization or in
//! a value that does not fit the wire vocabulary; a `ValidationError`
//! means a form was rejected before any request left the client.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields, or a
    /// role tag the client does not know.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A role tag that is not one of the known roles.
    ///
    /// Roles are matched exactly, so `"superuser"` is rejected rather
    /// than being mistaken for `"user"`.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),
}

/// A form failed a local check. The message is what the user sees inline.
///
/// These never reach the network: the caller returns early and leaves
/// its previous state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username and Password are required")]
    MissingCredentials,

    #[error("Category Name can't be Empty.")]
    EmptyCategoryName,

    #[error("All fields are required")]
    IncompleteForm,

    #[error("Quantity must be greater than 0")]
    NonPositiveQuantity,

    #[error("No items in stock order")]
    EmptyStockBatch,

    #[error("Not enough stock available")]
    InsufficientStock,

    #[error("Username already exists")]
    DuplicateUsername,
}
