//! # Groth16 Proving Methods
//!
//! [`Groth16Method`] binds a Groth16 prover/verifier ([`Groth16Backend`]) to one
//! circuit's public-signal layout. Verification first unmarshals the public
//! signals and checks the declared challenge against the message hash, then
//! delegates to the backend. The backend is never consulted for a proof whose
//! challenge does not match.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use jwz_crypto::challenge_from_bytes;

use crate::circuits::{AuthPubSignals, ChallengeSignals, PubSignalsUnmarshaller};
use crate::proof::ZkProof;
use crate::traits::{ProofError, ProvingMethod, ProvingMethodAlg, VerifyError};

/// Algorithm identifier of Groth16 proofs.
pub const GROTH16: &str = "groth16";

/// Circuit identifier of the authentication circuit.
pub const AUTH_CIRCUIT_ID: &str = "auth";

/// The Groth16 proof system itself, without circuit semantics.
///
/// A backend wraps a witness calculator plus prover for [`prove`] and a
/// pairing check for [`verify`]. Keys and the circuit program are opaque
/// bytes in whatever format the backend expects.
///
/// [`prove`]: Groth16Backend::prove
/// [`verify`]: Groth16Backend::verify
pub trait Groth16Backend: Send + Sync + fmt::Debug {
    /// Compute a witness from `inputs` with `program` and prove it.
    fn prove(
        &self,
        inputs: &[u8],
        proving_key: &[u8],
        program: &[u8],
    ) -> Result<ZkProof, ProofError>;

    /// Check `proof` and its public signals against `verification_key`.
    fn verify(&self, proof: &ZkProof, verification_key: &[u8]) -> Result<(), VerifyError>;
}

/// Groth16 bound to a circuit whose outputs are decoded as `S`.
pub struct Groth16Method<S> {
    circuit_id: String,
    backend: Arc<dyn Groth16Backend>,
    _signals: PhantomData<fn() -> S>,
}

/// Groth16 over the `auth` circuit.
pub type Groth16AuthMethod = Groth16Method<AuthPubSignals>;

impl Groth16AuthMethod {
    /// `groth16` / `auth` over the given backend.
    pub fn auth(backend: Arc<dyn Groth16Backend>) -> Self {
        Self::new(AUTH_CIRCUIT_ID, backend)
    }

    /// Registry key of [`Groth16AuthMethod`].
    pub fn auth_alg() -> ProvingMethodAlg {
        ProvingMethodAlg::new(GROTH16, AUTH_CIRCUIT_ID)
    }
}

impl<S> Groth16Method<S> {
    /// Bind `backend` to `circuit_id`.
    pub fn new(circuit_id: impl Into<String>, backend: Arc<dyn Groth16Backend>) -> Self {
        Self {
            circuit_id: circuit_id.into(),
            backend,
            _signals: PhantomData,
        }
    }
}

impl<S> Clone for Groth16Method<S> {
    fn clone(&self) -> Self {
        Self {
            circuit_id: self.circuit_id.clone(),
            backend: Arc::clone(&self.backend),
            _signals: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Groth16Method<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Groth16Method")
            .field("circuit_id", &self.circuit_id)
            .field("backend", &self.backend)
            .finish()
    }
}

impl<S> ProvingMethod for Groth16Method<S>
where
    S: PubSignalsUnmarshaller + ChallengeSignals,
{
    fn alg(&self) -> &str {
        GROTH16
    }

    fn circuit_id(&self) -> &str {
        &self.circuit_id
    }

    fn prove(
        &self,
        inputs: &[u8],
        proving_key: &[u8],
        program: &[u8],
    ) -> Result<ZkProof, ProofError> {
        let proof = self.backend.prove(inputs, proving_key, program)?;
        tracing::debug!(
            circuit_id = %self.circuit_id,
            signals = proof.pub_signals.len(),
            "generated groth16 proof"
        );
        Ok(proof)
    }

    fn verify(
        &self,
        message_hash: &[u8],
        proof: &ZkProof,
        verification_key: &[u8],
    ) -> Result<(), VerifyError> {
        let outputs = S::from_pub_signals(&proof.pub_signals)?;

        let expected = challenge_from_bytes(message_hash);
        if *outputs.challenge() != expected {
            tracing::warn!(circuit_id = %self.circuit_id, "proof challenge does not match message hash");
            return Err(VerifyError::ChallengeMismatch {
                expected: expected.to_str_radix(10),
                actual: outputs.challenge().to_str_radix(10),
            });
        }

        self.backend.verify(proof, verification_key)
    }
}
