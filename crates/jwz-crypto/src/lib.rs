//! # jwz-crypto: Hashing Primitives for JWZ Tokens
//!
//! This crate provides the hash side of the hash-to-challenge binding:
//!
//! - the [`Hasher`] trait and the default [`PoseidonHasher`], which maps a
//!   token's signing input onto a BN254 scalar field element through SHA-256
//!   and Poseidon, plus the SHA-only [`Sha256FieldHasher`] and [`Sha256Hasher`];
//! - [`challenge`] helpers converting between digest bytes, unsigned
//!   big-endian integers and the decimal form circuits publish.

pub mod challenge;
pub mod error;
pub mod hasher;

// Re-export primary types.
pub use challenge::{challenge_from_bytes, challenge_to_decimal, parse_decimal, DIGEST_LEN};
pub use error::HashError;
pub use hasher::{Hasher, PoseidonHasher, Sha256FieldHasher, Sha256Hasher};
