//! # Challenge Integers
//!
//! A challenge is the message hash read as an unsigned big-endian integer.
//! Circuits publish it as a decimal string among their public signals, so the
//! comparison between the two must happen numerically: leading zero bytes in
//! the hash and leading zeros in a decimal rendering are irrelevant.

use num_bigint::BigUint;

/// Size of a message-hash digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Interpret hash bytes as an unsigned big-endian integer.
pub fn challenge_from_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Decimal rendering of a challenge, as used in circuit public signals.
pub fn challenge_to_decimal(bytes: &[u8]) -> String {
    challenge_from_bytes(bytes).to_str_radix(10)
}

/// Parse a decimal public signal.
///
/// Only ASCII digits are accepted: no sign, no separators, no whitespace.
pub fn parse_decimal(s: &str) -> Option<BigUint> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(s.as_bytes(), 10)
}

/// Left-pad an integer into a fixed-size big-endian array.
///
/// Values wider than [`DIGEST_LEN`] bytes keep their low-order bytes.
pub fn to_be_bytes(n: &BigUint) -> [u8; DIGEST_LEN] {
    let raw = n.to_bytes_be();
    let mut out = [0u8; DIGEST_LEN];
    let take = raw.len().min(DIGEST_LEN);
    out[DIGEST_LEN - take..].copy_from_slice(&raw[raw.len() - take..]);
    out
}
