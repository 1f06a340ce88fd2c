//! # Proving Method Trait
//!
//! The core abstraction that lets different proof systems and circuits be
//! swapped in while the token framing stays fixed. A [`ProvingMethod`] is one
//! concrete (algorithm, circuit) pairing, identified by a [`ProvingMethodAlg`].
//!
//! ## Security Invariant
//!
//! [`ProvingMethod::verify`] receives the message hash the verifier computed
//! itself. An implementation must extract the challenge declared in the
//! proof's public signals and compare it to that hash BEFORE handing the proof
//! to the cryptographic verifier. Skipping the comparison lets a structurally
//! valid proof for an unrelated payload pass.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::proof::ZkProof;

/// Error during proof generation.
///
/// Returned by [`ProvingMethod::prove`] when proof generation cannot proceed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The circuit inputs, proving key or circuit program are invalid.
    #[error("invalid circuit inputs: {0}")]
    InvalidInputs(String),
    /// Proof generation failed inside the proof system.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
}

/// Error during proof verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The proof or its public signals are structurally malformed.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// The challenge declared in the public signals is not the message hash.
    #[error("challenge mismatch: message hash is {expected}, proof declares {actual}")]
    ChallengeMismatch {
        /// Decimal message hash recomputed by the verifier.
        expected: String,
        /// Decimal challenge found in the proof's public signals.
        actual: String,
    },
    /// The proof system rejected the proof.
    #[error("proof verification failed: {0}")]
    VerificationFailed(String),
}

/// Registry key of a proving method: an algorithm paired with a circuit.
///
/// Two algs are equal iff both fields match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProvingMethodAlg {
    alg: String,
    #[serde(rename = "circuitId")]
    circuit_id: String,
}

impl ProvingMethodAlg {
    /// Pair an algorithm identifier with a circuit identifier.
    pub fn new(alg: impl Into<String>, circuit_id: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            circuit_id: circuit_id.into(),
        }
    }

    /// The proving algorithm, e.g. `groth16`.
    pub fn alg(&self) -> &str {
        &self.alg
    }

    /// The circuit identifier, e.g. `auth`.
    pub fn circuit_id(&self) -> &str {
        &self.circuit_id
    }
}

impl fmt::Display for ProvingMethodAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.alg, self.circuit_id)
    }
}

/// A proof system bound to one circuit.
///
/// Implementations are shared behind `Arc` by the registry and by every token
/// that uses them, so they must be `Send + Sync`. Both operations are blocking
/// and may be expensive; they expose no cancellation.
pub trait ProvingMethod: Send + Sync + fmt::Debug {
    /// Algorithm identifier written to the `alg` header.
    fn alg(&self) -> &str;

    /// Circuit identifier written to the `circuitId` header.
    fn circuit_id(&self) -> &str;

    /// The registry key this method answers to.
    fn method_alg(&self) -> ProvingMethodAlg {
        ProvingMethodAlg::new(self.alg(), self.circuit_id())
    }

    /// Generate a proof from prepared circuit inputs.
    ///
    /// # Errors
    ///
    /// Failures of the underlying proof system propagate unchanged.
    fn prove(
        &self,
        inputs: &[u8],
        proving_key: &[u8],
        program: &[u8],
    ) -> Result<ZkProof, ProofError>;

    /// Verify `proof` against `message_hash`.
    ///
    /// Must unmarshal the public signals, compare the declared challenge with
    /// `message_hash` read as an unsigned big-endian integer (failing with
    /// [`VerifyError::ChallengeMismatch`]), and only then run the
    /// proof-system-specific check.
    fn verify(
        &self,
        message_hash: &[u8],
        proof: &ZkProof,
        verification_key: &[u8],
    ) -> Result<(), VerifyError>;
}

/// Caller-supplied hook producing circuit inputs for a message hash.
///
/// The core treats both the hook and its output as opaque. Closures of the
/// shape `Fn(&[u8], &str) -> anyhow::Result<Vec<u8>>` implement it.
pub trait InputsPreparer: Send + Sync {
    /// Build the serialized circuit inputs for `hash` and `circuit_id`.
    fn prepare(&self, hash: &[u8], circuit_id: &str) -> anyhow::Result<Vec<u8>>;
}

impl<F> InputsPreparer for F
where
    F: Fn(&[u8], &str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn prepare(&self, hash: &[u8], circuit_id: &str) -> anyhow::Result<Vec<u8>> {
        self(hash, circuit_id)
    }
}
