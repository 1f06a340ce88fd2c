//! # Message Hasher
//!
//! The [`Hasher`] turns the token's signing input
//! (`base64url(header) "." base64url(payload)`) into the 32-byte challenge the
//! proof must attest to.
//!
//! The default [`PoseidonHasher`] computes SHA-256, reads the digest as a
//! little-endian integer, reduces it into the BN254 scalar field and applies
//! the circom-parameterized Poseidon hash to that single element. This is the
//! challenge iden3 circuits expect, so tokens proven by other JWZ
//! implementations verify here.
//!
//! [`Sha256FieldHasher`] stops after the field reduction and
//! [`Sha256Hasher`] is plain SHA-256; both are available for circuits that
//! take those values directly.

use std::fmt;

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use light_poseidon::{Poseidon, PoseidonHasher as _};
use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::challenge::{to_be_bytes, DIGEST_LEN};
use crate::error::HashError;

/// BN254 scalar field order `r`, big-endian.
pub const BN254_SCALAR_ORDER_BE: [u8; DIGEST_LEN] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58,
    0x5d, 0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00,
    0x00, 0x01,
];

/// Deterministic byte-hash producing a fixed-size big-endian digest.
///
/// Implementations must be pure: same input, same output, no external state.
pub trait Hasher: Send + Sync + fmt::Debug {
    /// Hash `message` into a big-endian digest.
    fn hash(&self, message: &[u8]) -> Result<[u8; DIGEST_LEN], HashError>;
}

/// Poseidon over the SHA-256 field element of the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseidonHasher;

impl Hasher for PoseidonHasher {
    fn hash(&self, message: &[u8]) -> Result<[u8; DIGEST_LEN], HashError> {
        let element = Fr::from_le_bytes_mod_order(&Sha256::digest(message));
        let mut poseidon =
            Poseidon::<Fr>::new_circom(1).map_err(|e| HashError::Poseidon(e.to_string()))?;
        let out = poseidon
            .hash(&[element])
            .map_err(|e| HashError::Poseidon(e.to_string()))?;
        let be = BigUint::from_bytes_be(&out.into_bigint().to_bytes_be());
        Ok(to_be_bytes(&be))
    }
}

/// SHA-256 reduced into the BN254 scalar field.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256FieldHasher;

impl Sha256FieldHasher {
    /// The reduced digest. Infallible, unlike the trait method's signature.
    pub fn digest(message: &[u8]) -> [u8; DIGEST_LEN] {
        let digest = Sha256::digest(message);
        let order = BigUint::from_bytes_be(&BN254_SCALAR_ORDER_BE);
        let reduced = BigUint::from_bytes_le(&digest) % order;
        to_be_bytes(&reduced)
    }
}

impl Hasher for Sha256FieldHasher {
    fn hash(&self, message: &[u8]) -> Result<[u8; DIGEST_LEN], HashError> {
        Ok(Self::digest(message))
    }
}

/// Plain SHA-256 with no field reduction.
///
/// Useful for proof systems whose public inputs are full 256-bit words.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash(&self, message: &[u8]) -> Result<[u8; DIGEST_LEN], HashError> {
        Ok(Sha256::digest(message).into())
    }
}
