//! # Proof Data Model
//!
//! The proof object carried in the third compact segment. The layout follows
//! the snarkjs/rapidsnark JSON convention: curve points as arrays of decimal
//! strings, public signals as decimal strings.
//!
//! Field declaration order is the JSON field order, so a parsed proof
//! re-serializes to the exact bytes it was read from.

use serde::{Deserialize, Serialize};

/// Proof points and protocol tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofData {
    /// G1 point A (projective, decimal coordinates).
    pub pi_a: Vec<String>,
    /// G2 point B (projective, decimal coordinate pairs).
    pub pi_b: Vec<Vec<String>>,
    /// G1 point C (projective, decimal coordinates).
    pub pi_c: Vec<String>,
    /// Proof system tag, e.g. `groth16`.
    pub protocol: String,
}

/// A zero-knowledge proof with its public signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkProof {
    /// The proof points.
    pub proof: ProofData,
    /// Public signals in circuit output order, as decimal strings.
    pub pub_signals: Vec<String>,
}

impl ZkProof {
    /// Serialize to compact JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
