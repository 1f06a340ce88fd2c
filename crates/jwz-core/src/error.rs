//! # Error Hierarchy
//!
//! Structured errors for the token framing layer, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Wire-level problems (segment count, base64, JSON, size limits) are
//! [`FormatError`]s. Problems with the decoded header contents are
//! [`HeaderError`]s. The two are kept apart because a header error is a
//! security boundary: a well-formed token that lists an unknown critical
//! header must be rejected even though it decodes cleanly.

use thiserror::Error;

/// Errors while decoding or bounding the wire encodings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The compact form did not have exactly three dot-separated segments.
    #[error("compact JWZ format must have three segments, found {0}")]
    SegmentCount(usize),

    /// A segment was not valid base64 for its expected alphabet.
    #[error("invalid base64 in {segment}: {reason}")]
    InvalidBase64 {
        /// Which part of the token failed to decode.
        segment: &'static str,
        /// Decoder diagnostic.
        reason: String,
    },

    /// A JSON document inside the token was malformed.
    #[error("invalid JSON in {segment}: {reason}")]
    InvalidJson {
        /// Which part of the token held the malformed JSON.
        segment: &'static str,
        /// Parser diagnostic.
        reason: String,
    },

    /// The protected header was absent or empty.
    #[error("missing protected header")]
    MissingProtected,

    /// The input or a decoded segment exceeded its configured bound.
    #[error("{segment} too large: {size} bytes (maximum: {max} bytes)")]
    TooLarge {
        /// What was being measured.
        segment: &'static str,
        /// Observed size.
        size: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Errors in the contents of a decoded header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// A key listed in `crit` does not appear in the header.
    #[error("header \"{0}\" is listed in crit but not present")]
    MissingCritical(String),

    /// A reserved header required for dispatch is absent.
    #[error("required header \"{0}\" is missing")]
    Missing(&'static str),

    /// A header is present but has the wrong value type.
    #[error("header \"{key}\" must be {expected}")]
    InvalidType {
        /// The offending header key.
        key: String,
        /// Human-readable description of the accepted type.
        expected: &'static str,
    },

    /// A header value is not representable as a string, string list or integer.
    #[error("header \"{key}\" has unsupported value: {found}")]
    UnsupportedValue {
        /// The offending header key.
        key: String,
        /// Short description of the rejected JSON value.
        found: String,
    },
}

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
