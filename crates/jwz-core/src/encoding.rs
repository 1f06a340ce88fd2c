//! # Base64 Codecs
//!
//! Thin wrappers over `base64ct` for the two alphabets the token uses:
//!
//! - unpadded URL-safe base64 for the compact segments and the message-hash input;
//! - standard padded base64 for byte fields of the full (JSON) serialization.
//!
//! Decoding accepts only the canonical encoding; padded input is rejected by
//! the URL-safe decoder.

use base64ct::{Base64, Base64UrlUnpadded, Encoding};

use crate::error::FormatError;

/// Encode bytes as unpadded base64url.
pub fn b64url_encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decode unpadded base64url, naming the segment in the error.
pub fn b64url_decode(input: &str, segment: &'static str) -> Result<Vec<u8>, FormatError> {
    Base64UrlUnpadded::decode_vec(input).map_err(|e| FormatError::InvalidBase64 {
        segment,
        reason: e.to_string(),
    })
}

/// Serde helper for `Vec<u8>` fields encoded as standard padded base64.
pub mod base64_bytes {
    use base64ct::{Base64, Encoding};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&Base64::encode_string(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Base64::decode_vec(&s).map_err(serde::de::Error::custom)
    }
}

/// Encode bytes as standard padded base64.
pub fn b64_encode(bytes: &[u8]) -> String {
    Base64::encode_string(bytes)
}
