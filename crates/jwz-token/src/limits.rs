//! Size limits applied while parsing untrusted tokens.

use jwz_core::FormatError;

/// Default maximum input length (256 KiB).
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 256 * 1024;

/// Default maximum decoded protected header (8 KiB).
pub const DEFAULT_MAX_HEADER_BYTES: usize = 8 * 1024;

/// Default maximum decoded payload (128 KiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 128 * 1024;

/// Default maximum decoded proof JSON (64 KiB).
pub const DEFAULT_MAX_PROOF_BYTES: usize = 64 * 1024;

/// Upper bounds on token and segment sizes.
///
/// The input length is checked before any splitting or decoding; each
/// segment is checked again after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum length of the whole input string, in bytes.
    pub max_token_length: usize,
    /// Maximum decoded protected header size.
    pub max_header_bytes: usize,
    /// Maximum decoded payload size.
    pub max_payload_bytes: usize,
    /// Maximum decoded proof size.
    pub max_proof_bytes: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            max_proof_bytes: DEFAULT_MAX_PROOF_BYTES,
        }
    }
}

impl ParseLimits {
    /// No effective limits.
    pub fn unlimited() -> Self {
        Self {
            max_token_length: usize::MAX,
            max_header_bytes: usize::MAX,
            max_payload_bytes: usize::MAX,
            max_proof_bytes: usize::MAX,
        }
    }

    pub(crate) fn check_token(&self, len: usize) -> Result<(), FormatError> {
        check("token", len, self.max_token_length)
    }

    pub(crate) fn check_header(&self, len: usize) -> Result<(), FormatError> {
        check("protected header", len, self.max_header_bytes)
    }

    pub(crate) fn check_payload(&self, len: usize) -> Result<(), FormatError> {
        check("payload", len, self.max_payload_bytes)
    }

    pub(crate) fn check_proof(&self, len: usize) -> Result<(), FormatError> {
        check("proof", len, self.max_proof_bytes)
    }
}

fn check(segment: &'static str, size: usize, max: usize) -> Result<(), FormatError> {
    if size > max {
        return Err(FormatError::TooLarge { segment, size, max });
    }
    Ok(())
}
