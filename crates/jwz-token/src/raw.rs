//! # Raw Token Components
//!
//! [`RawToken`] holds the token exactly as it travels: payload, protected
//! header bytes, the decoded header map and the proof JSON bytes. Its serde
//! form is the full serialization:
//!
//! ```json
//! {"payload":"<b64>","protected":"<b64>","header":{...},"zkp":"<b64>"}
//! ```
//!
//! Byte fields use standard padded base64. Every field is omitted when empty.

use jwz_core::encoding::base64_bytes;
use jwz_core::{b64url_encode, Header};
use serde::{Deserialize, Serialize};

/// Wire components of a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawToken {
    /// Application payload, opaque to the token layer.
    #[serde(skip_serializing_if = "Vec::is_empty", with = "base64_bytes")]
    pub payload: Vec<u8>,
    /// Exact header bytes the proof was computed over.
    #[serde(skip_serializing_if = "Vec::is_empty", with = "base64_bytes")]
    pub protected: Vec<u8>,
    /// Decoded header map.
    #[serde(skip_serializing_if = "Header::is_empty")]
    pub header: Header,
    /// Proof JSON bytes.
    #[serde(skip_serializing_if = "Vec::is_empty", with = "base64_bytes")]
    pub zkp: Vec<u8>,
}

impl RawToken {
    /// Assemble the compact form from protected bytes, payload and proof bytes.
    pub(crate) fn compact(protected: &[u8], payload: &[u8], zkp: &[u8]) -> String {
        format!(
            "{}.{}.{}",
            b64url_encode(protected),
            b64url_encode(payload),
            b64url_encode(zkp)
        )
    }
}

/// Full serialization as read from the wire.
///
/// `header` is not read. All headers are protected, so the map is re-derived
/// from `protected`.
#[derive(Debug, Deserialize)]
pub(crate) struct FullForm {
    #[serde(default, with = "base64_bytes")]
    pub payload: Vec<u8>,
    #[serde(default, with = "base64_bytes")]
    pub protected: Vec<u8>,
    #[serde(default, with = "base64_bytes")]
    pub zkp: Vec<u8>,
}
