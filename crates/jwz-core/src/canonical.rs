//! # Canonical Serialization
//!
//! This module defines [`CanonicalBytes`], the sole construction path for the
//! header bytes that are protected, hashed into the challenge, and emitted in
//! the first segment of a compact token.
//!
//! ## Security Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct `CanonicalBytes`
//! is through [`CanonicalBytes::new()`], which rejects floats and serializes
//! with sorted keys and compact separators (RFC 8785). Two parties holding the
//! same header map therefore always derive the same message hash, regardless
//! of the insertion order of the header keys.
//!
//! [`CanonicalBytes::escape_html()`] additionally rewrites the characters Go's
//! `encoding/json` escapes, so header bytes agree with Go-produced tokens.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`; `escape_html()` only
///   rewrites string contents of an existing value.
/// - Numbers are integers, never floats.
/// - Object keys are sorted, separators are compact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// float numbers, `CanonicalizationError::SerializationFailed` if JCS
    /// serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Escape `<`, `>`, `&`, U+2028 and U+2029 as `\uXXXX`, matching Go's
    /// `json.Marshal`.
    ///
    /// Canonical JSON only contains these characters inside strings, and the
    /// UTF-8 encodings of U+2028/U+2029 cannot start mid-character, so a byte
    /// scan leaves the structure untouched.
    pub fn escape_html(self) -> Self {
        let bytes = self.0;
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'<' => out.extend_from_slice(b"\\u003c"),
                b'>' => out.extend_from_slice(b"\\u003e"),
                b'&' => out.extend_from_slice(b"\\u0026"),
                0xE2 if bytes.get(i + 1) == Some(&0x80)
                    && matches!(bytes.get(i + 2), Some(0xA8 | 0xA9)) =>
                {
                    let escape: &[u8] = if bytes[i + 2] == 0xA8 {
                        b"\\u2028"
                    } else {
                        b"\\u2029"
                    };
                    out.extend_from_slice(escape);
                    i += 3;
                    continue;
                }
                b => out.push(b),
            }
            i += 1;
        }
        Self(out)
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Guards `CanonicalBytes::new` on arbitrary `Serialize` input. `Header`
// values cannot hold floats; other callers' values can.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Number(n) if n.is_f64() => {
            Err(CanonicalizationError::FloatRejected(n.as_f64().unwrap_or(f64::NAN)))
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(arr) => arr.iter().try_for_each(reject_floats),
        _ => Ok(()),
    }
}
