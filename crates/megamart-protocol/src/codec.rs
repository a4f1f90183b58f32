//! Codec trait and implementations for serializing/deserializing values.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The HTTP client lets `reqwest` handle JSON bodies directly, but the
//! durable session store needs to turn its record into bytes on disk.
//! It does that through the [`Codec`] trait so the on-disk format can be
//! swapped without touching the store.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → safe to share between threads (the store may be
///   used from any Tokio worker).
/// - `'static` → the codec owns everything it needs.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the result doesn't
/// borrow from the input bytes, so the read buffer can be dropped right
/// after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// JSON keeps the persisted session human-readable: an operator can open
/// the session file and see which role is logged in.
///
/// ## Example
///
/// ```rust
/// use megamart_protocol::{Codec, JsonCodec, LoginResponse, Role};
///
/// let codec = JsonCodec;
/// let bytes = br#"{"jwtToken":"abc","usertype":"admin"}"#;
///
/// let response: LoginResponse = codec.decode(bytes).unwrap();
/// assert_eq!(response.role, Some(Role::Admin));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec_pretty(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_decode_truncated_input_returns_decode_error() {
        let codec = JsonCodec;

        let result: Result<BTreeMap<String, String>, _> = codec.decode(b"{\"token\":");

        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_map_is_readable_json() {
        let codec = JsonCodec;
        let mut entries = BTreeMap::new();
        entries.insert("user".to_string(), "cashier".to_string());

        let bytes = codec.encode(&entries).expect("encode");
        let text = String::from_utf8(bytes).expect("utf8");

        assert!(text.contains("\"user\": \"cashier\""));
    }
}
