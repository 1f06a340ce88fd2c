//! # Token Lifecycle
//!
//! A [`Token`] is created fresh from a payload and a proving method, or parsed
//! from the wire. A fresh token becomes proven through [`Token::prove`]; a
//! parsed token is proven iff the wire data carried a proof.
//!
//! ```text
//! new_with_payload ──► Fresh ──prove──► Proven ──verify──► Ok(true) | Err(_)
//! parse ──────────────► Fresh | Proven
//! ```
//!
//! ## Message hash
//!
//! The hash the proof is bound to is computed over
//! `base64url(canonical header) || "." || base64url(payload)` with the
//! token's [`Hasher`]. It is recomputed on every call and never cached, so
//! any header or payload change after proving makes verification fail.

use std::fmt;
use std::sync::Arc;

use jwz_core::{b64url_encode, Header, HeaderValue};
use jwz_crypto::{Hasher, PoseidonHasher};
use jwz_zkp::{
    InputsPreparer, ProvingMethod, ProvingMethodAlg, ProvingMethodRegistry,
    PubSignalsUnmarshaller, ZkProof,
};

use crate::error::JwzError;
use crate::parser::TokenParser;
use crate::raw::RawToken;

/// A JSON Web Zero-knowledge token.
///
/// Not internally synchronized: share it across threads only behind external
/// synchronization.
pub struct Token {
    method_alg: ProvingMethodAlg,
    method: Arc<dyn ProvingMethod>,
    proof: Option<ZkProof>,
    raw: RawToken,
    inputs_preparer: Option<Arc<dyn InputsPreparer>>,
    hasher: Arc<dyn Hasher>,
}

impl Token {
    /// A fresh, unproven token.
    ///
    /// The header is populated with `alg`, `circuitId`, `crit: ["circuitId"]`
    /// and `typ: "JWZ"` taken from `method`.
    pub fn new_with_payload(
        method: Arc<dyn ProvingMethod>,
        payload: impl Into<Vec<u8>>,
        inputs_preparer: Arc<dyn InputsPreparer>,
    ) -> Self {
        let method_alg = method.method_alg();
        let raw = RawToken {
            payload: payload.into(),
            header: Header::defaults(method_alg.alg(), method_alg.circuit_id()),
            ..RawToken::default()
        };
        Self {
            method_alg,
            method,
            proof: None,
            raw,
            inputs_preparer: Some(inputs_preparer),
            hasher: Arc::new(PoseidonHasher),
        }
    }

    /// Parse either serialization with default limits and hasher.
    ///
    /// Use [`TokenParser`] to change either.
    pub fn parse(input: &str, registry: &ProvingMethodRegistry) -> Result<Self, JwzError> {
        TokenParser::new(registry).parse(input)
    }

    pub(crate) fn from_parts(
        method_alg: ProvingMethodAlg,
        method: Arc<dyn ProvingMethod>,
        proof: Option<ZkProof>,
        raw: RawToken,
        hasher: Arc<dyn Hasher>,
    ) -> Self {
        Self {
            method_alg,
            method,
            proof,
            raw,
            inputs_preparer: None,
            hasher,
        }
    }

    /// Replace the message hasher.
    pub fn with_hasher(mut self, hasher: Arc<dyn Hasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Attach an inputs preparer, e.g. to re-prove a parsed token.
    pub fn with_inputs_preparer(mut self, preparer: Arc<dyn InputsPreparer>) -> Self {
        self.inputs_preparer = Some(preparer);
        self
    }

    /// Set or overwrite a header. Nothing is validated until [`Token::prove`].
    pub fn set_header(
        &mut self,
        key: impl Into<String>,
        value: impl Into<HeaderValue>,
    ) -> &mut Self {
        self.raw.header.insert(key, value);
        self
    }

    /// Replace the payload. An existing proof is kept and will no longer verify.
    pub fn set_payload(&mut self, payload: impl Into<Vec<u8>>) -> &mut Self {
        self.raw.payload = payload.into();
        self
    }

    /// Current header map.
    pub fn header(&self) -> &Header {
        &self.raw.header
    }

    /// Payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.raw.payload
    }

    /// Protected header bytes; empty until proven or parsed.
    pub fn protected(&self) -> &[u8] {
        &self.raw.protected
    }

    /// The proof, if the token is proven.
    pub fn proof(&self) -> Option<&ZkProof> {
        self.proof.as_ref()
    }

    /// Proving algorithm.
    pub fn alg(&self) -> &str {
        self.method_alg.alg()
    }

    /// Circuit identifier.
    pub fn circuit_id(&self) -> &str {
        self.method_alg.circuit_id()
    }

    /// Registry key of the token's proving method.
    pub fn method_alg(&self) -> &ProvingMethodAlg {
        &self.method_alg
    }

    /// The proving method.
    pub fn method(&self) -> &Arc<dyn ProvingMethod> {
        &self.method
    }

    /// All wire components.
    pub fn raw(&self) -> &RawToken {
        &self.raw
    }

    /// Hash of the signing input built from the current header and payload.
    pub fn message_hash(&self) -> Result<Vec<u8>, JwzError> {
        let header = self.raw.header.canonical_bytes()?;
        self.hash_signing_input(header.as_bytes())
    }

    fn hash_signing_input(&self, header: &[u8]) -> Result<Vec<u8>, JwzError> {
        let signing_input = format!(
            "{}.{}",
            b64url_encode(header),
            b64url_encode(&self.raw.payload)
        );
        Ok(self.hasher.hash(signing_input.as_bytes())?.to_vec())
    }

    /// Prove the token and return its compact serialization.
    ///
    /// Every step runs on locals; the token's protected bytes and proof are
    /// replaced only after all of them succeed, so a failure leaves the token
    /// unchanged.
    pub fn prove(&mut self, proving_key: &[u8], program: &[u8]) -> Result<String, JwzError> {
        let preparer = self.inputs_preparer.as_ref().ok_or_else(|| {
            JwzError::InputPreparation(anyhow::anyhow!("no inputs preparer attached to token"))
        })?;

        self.raw.header.validate_critical()?;
        let protected = self.raw.header.canonical_bytes()?.into_bytes();
        let hash = self.hash_signing_input(&protected)?;

        let inputs = preparer
            .prepare(&hash, self.method_alg.circuit_id())
            .map_err(JwzError::InputPreparation)?;
        let proof = self.method.prove(&inputs, proving_key, program)?;
        let zkp = proof
            .to_json_bytes()
            .map_err(|e| JwzError::Serialization(e.to_string()))?;

        let compact = RawToken::compact(&protected, &self.raw.payload, &zkp);

        self.raw.protected = protected;
        self.raw.zkp = zkp;
        self.proof = Some(proof);

        tracing::debug!(
            alg = %self.method_alg,
            payload_len = self.raw.payload.len(),
            "proved token"
        );
        Ok(compact)
    }

    /// Verify the proof against the recomputed message hash.
    ///
    /// Returns `Ok(true)` on success. Every failure, including a challenge
    /// mismatch, is an `Err`.
    pub fn verify(&self, verification_key: &[u8]) -> Result<bool, JwzError> {
        let proof = self
            .proof
            .as_ref()
            .ok_or(JwzError::MissingComponent("proof"))?;
        let hash = self.message_hash()?;

        if let Err(e) = self.method.verify(&hash, proof, verification_key) {
            tracing::warn!(alg = %self.method_alg, error = %e, "token verification failed");
            return Err(e.into());
        }
        tracing::debug!(alg = %self.method_alg, "token verified");
        Ok(true)
    }

    /// `base64url(protected).base64url(payload).base64url(proof)`.
    pub fn compact_serialize(&self) -> Result<String, JwzError> {
        if self.raw.header.is_empty() {
            return Err(JwzError::MissingComponent("header"));
        }
        if self.raw.protected.is_empty() {
            return Err(JwzError::MissingComponent("protected header"));
        }
        if self.proof.is_none() || self.raw.zkp.is_empty() {
            return Err(JwzError::MissingComponent("proof"));
        }
        Ok(RawToken::compact(&self.raw.protected, &self.raw.payload, &self.raw.zkp))
    }

    /// The full JSON serialization of [`RawToken`].
    pub fn full_serialize(&self) -> Result<String, JwzError> {
        serde_json::to_string(&self.raw).map_err(|e| JwzError::Serialization(e.to_string()))
    }

    /// Decode the proof's public signals into a circuit-specific record.
    pub fn parse_pub_signals<S: PubSignalsUnmarshaller>(&self) -> Result<S, JwzError> {
        let proof = self
            .proof
            .as_ref()
            .ok_or(JwzError::MissingComponent("proof"))?;
        S::from_pub_signals(&proof.pub_signals).map_err(JwzError::from)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("method_alg", &self.method_alg)
            .field("raw", &self.raw)
            .field("proof", &self.proof)
            .field("has_inputs_preparer", &self.inputs_preparer.is_some())
            .field("hasher", &self.hasher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwz_core::HeaderError;
    use jwz_crypto::{HashError, Sha256FieldHasher, Sha256Hasher};
    use jwz_zkp::{
        AuthPubSignals, Groth16AuthMethod, MockAuthInputs, MockGroth16Backend, ProofError,
        VerifyError,
    };

    const PK: &[u8] = b"proving key";

    fn method() -> Arc<dyn ProvingMethod> {
        Arc::new(Groth16AuthMethod::auth(Arc::new(MockGroth16Backend::auth())))
    }

    fn preparer() -> Arc<dyn InputsPreparer> {
        Arc::new(MockAuthInputs::new("11", "22"))
    }

    fn vk() -> Vec<u8> {
        MockGroth16Backend::verification_key_for(PK)
    }

    #[test]
    fn fresh_token_has_default_headers() {
        let token = Token::new_with_payload(method(), "mymessage", preparer());
        assert_eq!(token.alg(), "groth16");
        assert_eq!(token.circuit_id(), "auth");
        assert_eq!(token.header().token_type(), Some("JWZ"));
        assert_eq!(token.header().critical().unwrap(), vec!["circuitId"]);
        assert!(token.protected().is_empty());
        assert!(token.proof().is_none());
    }

    #[test]
    fn message_hash_matches_known_vector() {
        let token = Token::new_with_payload(method(), "mymessage", preparer());
        let hash = token.message_hash().unwrap();
        assert_eq!(
            jwz_crypto::challenge_to_decimal(&hash),
            "19054333970885023780123560936675456700861469068603321884718748961750930466794"
        );

        let token = token.with_hasher(Arc::new(Sha256FieldHasher));
        assert_eq!(
            jwz_crypto::challenge_to_decimal(&token.message_hash().unwrap()),
            "5554991798211784544738266856215742072098054177606796979129146807193602541420"
        );
    }

    #[derive(Debug)]
    struct FailingHasher;

    impl Hasher for FailingHasher {
        fn hash(&self, _message: &[u8]) -> Result<[u8; 32], HashError> {
            Err(HashError::Poseidon("unsupported width".to_string()))
        }
    }

    #[test]
    fn hasher_failure_surfaces_and_leaves_token_unchanged() {
        let mut token = Token::new_with_payload(method(), "mymessage", preparer())
            .with_hasher(Arc::new(FailingHasher));
        assert!(matches!(token.message_hash(), Err(JwzError::Hash(_))));
        assert!(matches!(token.prove(PK, b""), Err(JwzError::Hash(_))));
        assert!(token.protected().is_empty());
        assert!(token.proof().is_none());
    }

    #[test]
    fn message_hash_tracks_header_changes() {
        let mut token = Token::new_with_payload(method(), "mymessage", preparer());
        let before = token.message_hash().unwrap();
        token.set_header("nonce", "1");
        assert_ne!(before, token.message_hash().unwrap());
    }

    #[test]
    fn custom_hasher_is_used() {
        let token = Token::new_with_payload(method(), "mymessage", preparer());
        let default_hash = token.message_hash().unwrap();
        let token = token.with_hasher(Arc::new(Sha256Hasher));
        assert_ne!(default_hash, token.message_hash().unwrap());
    }

    #[test]
    fn prove_then_verify() {
        let mut token = Token::new_with_payload(method(), "mymessage", preparer());
        let compact = token.prove(PK, b"").unwrap();
        assert_eq!(compact.split('.').count(), 3);
        assert_eq!(compact, token.compact_serialize().unwrap());
        assert!(token.verify(&vk()).unwrap());

        let signals: AuthPubSignals = token.parse_pub_signals().unwrap();
        assert_eq!(
            signals.challenge,
            jwz_crypto::challenge_from_bytes(&token.message_hash().unwrap())
        );
    }

    #[test]
    fn payload_change_after_prove_is_challenge_mismatch() {
        let mut token = Token::new_with_payload(method(), "mymessage", preparer());
        token.prove(PK, b"").unwrap();
        token.set_payload("my message");
        assert!(matches!(
            token.verify(&vk()).unwrap_err(),
            JwzError::ChallengeMismatch { .. }
        ));
    }

    #[test]
    fn wrong_verification_key_fails() {
        let mut token = Token::new_with_payload(method(), "mymessage", preparer());
        token.prove(PK, b"").unwrap();
        match token.verify(b"not the key").unwrap_err() {
            JwzError::ProofVerification(VerifyError::VerificationFailed(_)) => {}
            other => panic!("expected VerificationFailed, got: {other:?}"),
        }
    }

    #[test]
    fn verify_without_proof() {
        let token = Token::new_with_payload(method(), "mymessage", preparer());
        assert!(matches!(
            token.verify(&vk()).unwrap_err(),
            JwzError::MissingComponent("proof")
        ));
    }

    #[test]
    fn compact_serialize_requires_proof() {
        let token = Token::new_with_payload(method(), "mymessage", preparer());
        assert!(matches!(
            token.compact_serialize().unwrap_err(),
            JwzError::MissingComponent(_)
        ));
    }

    #[test]
    fn failed_prove_leaves_token_untouched() {
        let mut token = Token::new_with_payload(method(), "mymessage", preparer());
        let header_before = token.header().clone();
        assert!(matches!(
            token.prove(b"", b"").unwrap_err(),
            JwzError::ProofGeneration(ProofError::InvalidInputs(_))
        ));
        assert_eq!(token.header(), &header_before);
        assert!(token.protected().is_empty());
        assert!(token.proof().is_none());
        assert!(token.raw().zkp.is_empty());
    }

    #[test]
    fn failed_reprove_keeps_previous_proof() {
        let mut token = Token::new_with_payload(method(), "mymessage", preparer());
        let first = token.prove(PK, b"").unwrap();
        token.set_header("nonce", "2");
        assert!(token.prove(b"", b"").is_err());
        assert_eq!(token.compact_serialize().unwrap(), first);
    }

    #[test]
    fn preparer_failure_is_input_preparation() {
        let failing = |_: &[u8], _: &str| -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("identity unavailable")
        };
        let mut token = Token::new_with_payload(method(), "mymessage", Arc::new(failing));
        match token.prove(PK, b"").unwrap_err() {
            JwzError::InputPreparation(e) => {
                assert!(e.to_string().contains("identity unavailable"))
            }
            other => panic!("expected InputPreparation, got: {other:?}"),
        }
        assert!(token.protected().is_empty());
    }

    #[test]
    fn prove_rejects_missing_critical_header() {
        let mut token = Token::new_with_payload(method(), "mymessage", preparer());
        token.set_header("crit", vec!["circuitId".to_string(), "exp".to_string()]);
        match token.prove(PK, b"").unwrap_err() {
            JwzError::Header(HeaderError::MissingCritical(key)) => assert_eq!(key, "exp"),
            other => panic!("expected MissingCritical, got: {other:?}"),
        }
    }

    #[test]
    fn full_serialize_omits_empty_fields() {
        let token = Token::new_with_payload(method(), "mymessage", preparer());
        assert_eq!(
            token.full_serialize().unwrap(),
            r#"{"payload":"bXltZXNzYWdl","header":{"alg":"groth16","circuitId":"auth","crit":["circuitId"],"typ":"JWZ"}}"#
        );
    }

    #[test]
    fn parse_pub_signals_without_proof() {
        let token = Token::new_with_payload(method(), "mymessage", preparer());
        assert!(matches!(
            token.parse_pub_signals::<AuthPubSignals>().unwrap_err(),
            JwzError::MissingComponent("proof")
        ));
    }

    #[test]
    fn parsed_token_needs_preparer_to_reprove() {
        let registry = ProvingMethodRegistry::new();
        registry.register(method());
        let mut token = Token::new_with_payload(method(), "mymessage", preparer());
        let compact = token.prove(PK, b"").unwrap();

        let mut parsed = Token::parse(&compact, &registry).unwrap();
        assert!(matches!(
            parsed.prove(PK, b"").unwrap_err(),
            JwzError::InputPreparation(_)
        ));
        let mut parsed = parsed.with_inputs_preparer(preparer());
        assert_eq!(parsed.prove(PK, b"").unwrap(), compact);
    }
}
