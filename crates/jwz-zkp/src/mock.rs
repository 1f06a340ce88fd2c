//! # Mock Groth16 Backend
//!
//! A deterministic, transparent stand-in for a real Groth16 prover. The
//! "proof points" are SHA-256 digests, reduced into the BN254 scalar field,
//! over the verification key and the canonical public signals. They have the
//! snarkjs shape, so tokens carrying them frame, parse and re-serialize
//! exactly like real ones.
//!
//! The verification key is a pure function of the proving key (see
//! [`MockGroth16Backend::verification_key_for`]), and verification recomputes
//! the points from the key and the public signals.
//!
//! ## Security Notice
//!
//! This backend provides NO zero-knowledge and NO soundness: anyone holding
//! the verification key can forge a proof for any signals. It exists for
//! tests and local tooling only.

use jwz_core::CanonicalBytes;
use jwz_crypto::{challenge_to_decimal, Sha256FieldHasher};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::circuits::AUTH_SIGNAL_NAMES;
use crate::groth16::{Groth16Backend, AUTH_CIRCUIT_ID, GROTH16};
use crate::proof::{ProofData, ZkProof};
use crate::traits::{InputsPreparer, ProofError, VerifyError};

const VK_DOMAIN: &[u8] = b"jwz-mock-groth16/vk";
const COMMITMENT_DOMAIN: &[u8] = b"jwz-mock-groth16/commitment";

/// Deterministic Groth16 stand-in.
///
/// Public signals are read from a JSON object of circuit inputs, by name, in
/// the configured order.
#[derive(Debug, Clone)]
pub struct MockGroth16Backend {
    signal_names: Vec<String>,
}

impl Default for MockGroth16Backend {
    fn default() -> Self {
        Self::auth()
    }
}

impl MockGroth16Backend {
    /// A backend publishing the named inputs, in order, as public signals.
    pub fn new<I, S>(signal_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            signal_names: signal_names.into_iter().map(Into::into).collect(),
        }
    }

    /// A backend for the `auth` circuit layout.
    pub fn auth() -> Self {
        Self::new(AUTH_SIGNAL_NAMES)
    }

    /// The verification key paired with `proving_key`.
    pub fn verification_key_for(proving_key: &[u8]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(VK_DOMAIN);
        hasher.update(proving_key);
        hasher.finalize().to_vec()
    }

    fn public_signals(&self, inputs: &[u8]) -> Result<Vec<String>, ProofError> {
        let value: Value = serde_json::from_slice(inputs)
            .map_err(|e| ProofError::InvalidInputs(format!("inputs are not JSON: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(ProofError::InvalidInputs(
                "inputs must be a JSON object".to_string(),
            ));
        };

        self.signal_names
            .iter()
            .map(|name| match fields.get(name) {
                Some(Value::String(s)) => jwz_crypto::parse_decimal(s)
                    .map(|n| n.to_str_radix(10))
                    .ok_or_else(|| {
                        ProofError::InvalidInputs(format!("input {name} is not a decimal integer"))
                    }),
                Some(Value::Number(n)) => n.as_u64().map(|n| n.to_string()).ok_or_else(|| {
                    ProofError::InvalidInputs(format!("input {name} is not a non-negative integer"))
                }),
                Some(_) => Err(ProofError::InvalidInputs(format!(
                    "input {name} must be a decimal string or integer"
                ))),
                None => Err(ProofError::InvalidInputs(format!("missing input {name}"))),
            })
            .collect()
    }

    fn proof_points(verification_key: &[u8], pub_signals: &[String]) -> Result<ProofData, String> {
        let canonical = CanonicalBytes::new(&pub_signals).map_err(|e| e.to_string())?;

        let mut hasher = Sha256::new();
        hasher.update(COMMITMENT_DOMAIN);
        hasher.update(verification_key);
        hasher.update(canonical.as_bytes());
        let commitment = hasher.finalize();

        let coordinate = |tag: &str, index: u8| {
            let mut preimage = Vec::with_capacity(tag.len() + 1 + commitment.len());
            preimage.extend_from_slice(tag.as_bytes());
            preimage.push(index);
            preimage.extend_from_slice(&commitment);
            challenge_to_decimal(&Sha256FieldHasher::digest(&preimage))
        };
        let one = || "1".to_string();

        Ok(ProofData {
            pi_a: vec![coordinate("pi_a", 0), coordinate("pi_a", 1), one()],
            pi_b: vec![
                vec![coordinate("pi_b", 0), coordinate("pi_b", 1)],
                vec![coordinate("pi_b", 2), coordinate("pi_b", 3)],
                vec![one(), "0".to_string()],
            ],
            pi_c: vec![coordinate("pi_c", 0), coordinate("pi_c", 1), one()],
            protocol: GROTH16.to_string(),
        })
    }
}

impl Groth16Backend for MockGroth16Backend {
    fn prove(
        &self,
        inputs: &[u8],
        proving_key: &[u8],
        _program: &[u8],
    ) -> Result<ZkProof, ProofError> {
        if proving_key.is_empty() {
            return Err(ProofError::InvalidInputs("empty proving key".to_string()));
        }
        let pub_signals = self.public_signals(inputs)?;
        let vk = Self::verification_key_for(proving_key);
        let proof = Self::proof_points(&vk, &pub_signals).map_err(ProofError::GenerationFailed)?;
        Ok(ZkProof { proof, pub_signals })
    }

    fn verify(&self, proof: &ZkProof, verification_key: &[u8]) -> Result<(), VerifyError> {
        if proof.proof.protocol != GROTH16 {
            return Err(VerifyError::MalformedProof(format!(
                "expected protocol {GROTH16}, got {}",
                proof.proof.protocol
            )));
        }
        let expected = Self::proof_points(verification_key, &proof.pub_signals)
            .map_err(VerifyError::MalformedProof)?;
        if expected != proof.proof {
            return Err(VerifyError::VerificationFailed(
                "proof points do not match verification key".to_string(),
            ));
        }
        Ok(())
    }
}

/// Inputs preparer for the `auth` circuit under the mock backend.
///
/// Produces `{"challenge": <hash as decimal>, "userState": .., "userID": ..}`.
#[derive(Debug, Clone)]
pub struct MockAuthInputs {
    user_state: String,
    user_id: String,
}

impl MockAuthInputs {
    /// Fixed identity values, given as decimal strings.
    pub fn new(user_state: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            user_state: user_state.into(),
            user_id: user_id.into(),
        }
    }
}

impl InputsPreparer for MockAuthInputs {
    fn prepare(&self, hash: &[u8], circuit_id: &str) -> anyhow::Result<Vec<u8>> {
        anyhow::ensure!(
            circuit_id == AUTH_CIRCUIT_ID,
            "mock auth inputs cannot be prepared for circuit {circuit_id}"
        );
        let inputs = serde_json::json!({
            "challenge": challenge_to_decimal(hash),
            "userState": self.user_state,
            "userID": self.user_id,
        });
        Ok(serde_json::to_vec(&inputs)?)
    }
}
