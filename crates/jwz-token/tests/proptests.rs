//! Property tests over arbitrary payloads and header sets.

use std::sync::Arc;

use jwz_core::{FormatError, HeaderError};
use jwz_token::{JwzError, Token};
use jwz_zkp::{
    Groth16AuthMethod, MockAuthInputs, MockGroth16Backend, ProvingMethod, ProvingMethodRegistry,
};
use proptest::prelude::*;

const PROVING_KEY: &[u8] = b"pk";

fn method() -> Arc<dyn ProvingMethod> {
    Arc::new(Groth16AuthMethod::auth(Arc::new(MockGroth16Backend::auth())))
}

fn registry() -> ProvingMethodRegistry {
    let registry = ProvingMethodRegistry::new();
    registry.register(method());
    registry
}

fn fresh(payload: Vec<u8>) -> Token {
    Token::new_with_payload(method(), payload, Arc::new(MockAuthInputs::new("1", "2")))
}

fn header_key() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("reserved", |k| {
        !matches!(k.as_str(), "alg" | "typ" | "crit" | "circuitId")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn compact_round_trip(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut token = fresh(payload.clone());
        let compact = token.prove(PROVING_KEY, b"").unwrap();
        let parsed = Token::parse(&compact, &registry()).unwrap();
        prop_assert_eq!(parsed.payload(), payload.as_slice());
        prop_assert_eq!(parsed.alg(), "groth16");
        prop_assert_eq!(parsed.circuit_id(), "auth");
        prop_assert_eq!(parsed.proof(), token.proof());
    }

    #[test]
    fn full_round_trip(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut token = fresh(payload.clone());
        token.prove(PROVING_KEY, b"").unwrap();
        let full = token.full_serialize().unwrap();
        let parsed = Token::parse(&full, &registry()).unwrap();
        prop_assert_eq!(parsed.payload(), payload.as_slice());
        prop_assert_eq!(parsed.proof(), token.proof());
        prop_assert_eq!(parsed.header(), token.header());
    }

    #[test]
    fn message_hash_is_deterministic(payload in proptest::collection::vec(any::<u8>(), 0..128)) {
        let a = fresh(payload.clone()).message_hash().unwrap();
        let b = fresh(payload).message_hash().unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn payload_mutation_changes_hash(
        payload in proptest::collection::vec(any::<u8>(), 1..128),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut token = fresh(payload.clone());
        let before = token.message_hash().unwrap();
        let mut changed = payload;
        let i = index.index(changed.len());
        changed[i] ^= flip;
        token.set_payload(changed);
        prop_assert_ne!(before, token.message_hash().unwrap());
    }

    #[test]
    fn tampered_payload_is_challenge_mismatch(
        payload in "[a-z]{1,32}",
        suffix in "[a-z]{1,8}",
    ) {
        let mut token = fresh(payload.clone().into_bytes());
        token.prove(PROVING_KEY, b"").unwrap();
        token.set_payload(format!("{payload}{suffix}"));
        let vk = MockGroth16Backend::verification_key_for(PROVING_KEY);
        let is_mismatch = matches!(
            token.verify(&vk),
            Err(JwzError::ChallengeMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }

    #[test]
    fn absent_critical_key_always_rejected(missing in header_key()) {
        let protected = format!(
            r#"{{"alg":"groth16","circuitId":"auth","crit":["circuitId","{missing}"]}}"#
        );
        let input = format!(
            "{}.{}.",
            jwz_core::b64url_encode(protected.as_bytes()),
            jwz_core::b64url_encode(b"payload"),
        );
        let is_missing_critical = matches!(
            Token::parse(&input, &registry()),
            Err(JwzError::Header(HeaderError::MissingCritical(ref k))) if *k == missing
        );
        prop_assert!(is_missing_critical);
    }

    #[test]
    fn wrong_segment_count_is_format_error(segments in proptest::collection::vec("[A-Za-z0-9_-]{0,12}", 1..8)) {
        prop_assume!(segments.len() != 3);
        let input = segments.join(".");
        prop_assume!(!input.trim().starts_with('{'));
        let expected = input.trim().split('.').count();
        let is_count_error = matches!(
            Token::parse(&input, &registry()),
            Err(JwzError::Format(FormatError::SegmentCount(n))) if n == expected
        );
        prop_assert!(is_count_error);
    }
}
