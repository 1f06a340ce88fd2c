//! # Token Parsing
//!
//! Parsing has four phases, each fallible with its own error kind:
//!
//! 1. **Framing**: trim the input, bound its length, pick compact or full form
//!    (a leading `{` means full), split and decode the segments.
//! 2. **Header**: decode the protected bytes, check every `crit` key is
//!    present, and read `alg` and `circuitId`.
//! 3. **Method**: resolve `(alg, circuitId)` in the caller's registry.
//! 4. **Proof**: decode the proof JSON when one is present.
//!
//! Compact input with the wrong number of segments is rejected before any
//! base64 decoding happens.

use std::sync::Arc;

use jwz_core::{b64url_decode, FormatError, Header};
use jwz_crypto::{Hasher, PoseidonHasher};
use jwz_zkp::{ProvingMethodAlg, ProvingMethodRegistry, ZkProof};

use crate::error::JwzError;
use crate::limits::ParseLimits;
use crate::raw::{FullForm, RawToken};
use crate::token::Token;

/// Parses compact and full serializations against a proving-method registry.
#[derive(Debug, Clone)]
pub struct TokenParser<'r> {
    registry: &'r ProvingMethodRegistry,
    limits: ParseLimits,
    hasher: Arc<dyn Hasher>,
}

impl<'r> TokenParser<'r> {
    /// A parser with default limits and the default message hasher.
    pub fn new(registry: &'r ProvingMethodRegistry) -> Self {
        Self {
            registry,
            limits: ParseLimits::default(),
            hasher: Arc::new(PoseidonHasher),
        }
    }

    /// Replace the size limits.
    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Hasher given to every parsed token.
    pub fn with_hasher(mut self, hasher: Arc<dyn Hasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// The active limits.
    pub fn limits(&self) -> &ParseLimits {
        &self.limits
    }

    /// Parse either serialization.
    pub fn parse(&self, input: &str) -> Result<Token, JwzError> {
        let input = input.trim();
        self.limits.check_token(input.len())?;

        let (raw, form) = if input.starts_with('{') {
            (self.decode_full(input)?, "full")
        } else {
            (self.decode_compact(input)?, "compact")
        };
        let token = self.sanitize(raw)?;

        tracing::debug!(
            form,
            alg = token.alg(),
            circuit_id = token.circuit_id(),
            payload_len = token.payload().len(),
            has_proof = token.proof().is_some(),
            "parsed token"
        );
        Ok(token)
    }

    fn decode_compact(&self, input: &str) -> Result<RawToken, FormatError> {
        let segments: Vec<&str> = input.split('.').collect();
        let [protected, payload, zkp] = segments.as_slice() else {
            return Err(FormatError::SegmentCount(segments.len()));
        };

        Ok(RawToken {
            protected: b64url_decode(protected, "protected header")?,
            payload: b64url_decode(payload, "payload")?,
            zkp: b64url_decode(zkp, "proof")?,
            header: Header::new(),
        })
    }

    fn decode_full(&self, input: &str) -> Result<RawToken, FormatError> {
        let full: FullForm =
            serde_json::from_str(input).map_err(|e| FormatError::InvalidJson {
                segment: "full serialization",
                reason: e.to_string(),
            })?;
        Ok(RawToken {
            payload: full.payload,
            protected: full.protected,
            header: Header::new(),
            zkp: full.zkp,
        })
    }

    fn sanitize(&self, mut raw: RawToken) -> Result<Token, JwzError> {
        self.limits.check_header(raw.protected.len())?;
        self.limits.check_payload(raw.payload.len())?;
        self.limits.check_proof(raw.zkp.len())?;

        let header = Header::from_protected(&raw.protected)?;
        header.validate_critical()?;
        let method_alg = ProvingMethodAlg::new(header.alg()?, header.circuit_id()?);
        let method = self.registry.get(&method_alg)?;

        let proof = if raw.zkp.is_empty() {
            None
        } else {
            let proof =
                ZkProof::from_json_bytes(&raw.zkp).map_err(|e| FormatError::InvalidJson {
                    segment: "proof",
                    reason: e.to_string(),
                })?;
            Some(proof)
        };

        raw.header = header;
        Ok(Token::from_parts(
            method_alg,
            method,
            proof,
            raw,
            Arc::clone(&self.hasher),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwz_core::{b64url_encode, HeaderError};
    use jwz_zkp::{Groth16AuthMethod, MockGroth16Backend, UnsupportedMethod};

    fn registry() -> ProvingMethodRegistry {
        let registry = ProvingMethodRegistry::new();
        registry.register(Arc::new(Groth16AuthMethod::auth(Arc::new(
            MockGroth16Backend::auth(),
        ))));
        registry
    }

    fn compact(protected: &str, payload: &str, zkp: &str) -> String {
        format!(
            "{}.{}.{}",
            b64url_encode(protected.as_bytes()),
            b64url_encode(payload.as_bytes()),
            b64url_encode(zkp.as_bytes())
        )
    }

    const AUTH_HEADER: &str =
        r#"{"alg":"groth16","circuitId":"auth","crit":["circuitId"],"typ":"JWZ"}"#;

    #[test]
    fn segment_count_checked_before_decoding() {
        let registry = registry();
        let parser = TokenParser::new(&registry);
        // Neither segment is valid base64url; the count error must win.
        match parser.parse("!!!.???").unwrap_err() {
            JwzError::Format(FormatError::SegmentCount(2)) => {}
            other => panic!("expected SegmentCount(2), got: {other:?}"),
        }
        assert!(matches!(
            parser.parse("a.b.c.d").unwrap_err(),
            JwzError::Format(FormatError::SegmentCount(4))
        ));
        assert!(matches!(
            parser.parse("").unwrap_err(),
            JwzError::Format(FormatError::SegmentCount(1))
        ));
    }

    #[test]
    fn bad_base64_names_segment() {
        let registry = registry();
        let err = TokenParser::new(&registry).parse("e30.b@d.e30").unwrap_err();
        match err {
            JwzError::Format(FormatError::InvalidBase64 { segment, .. }) => {
                assert_eq!(segment, "payload")
            }
            other => panic!("expected InvalidBase64, got: {other:?}"),
        }
    }

    #[test]
    fn parses_unproven_compact_token() {
        let registry = registry();
        let token = TokenParser::new(&registry)
            .parse(&compact(AUTH_HEADER, "mymessage", ""))
            .unwrap();
        assert_eq!(token.alg(), "groth16");
        assert_eq!(token.circuit_id(), "auth");
        assert_eq!(token.payload(), b"mymessage");
        assert!(token.proof().is_none());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let registry = registry();
        let input = format!("\n  {}\t\n", compact(AUTH_HEADER, "m", ""));
        assert!(TokenParser::new(&registry).parse(&input).is_ok());
    }

    #[test]
    fn missing_critical_header_rejected() {
        let registry = registry();
        let header = r#"{"alg":"groth16","circuitId":"auth","crit":["circuitId","exp"]}"#;
        match TokenParser::new(&registry)
            .parse(&compact(header, "m", ""))
            .unwrap_err()
        {
            JwzError::Header(HeaderError::MissingCritical(key)) => assert_eq!(key, "exp"),
            other => panic!("expected MissingCritical, got: {other:?}"),
        }
    }

    #[test]
    fn absent_crit_is_accepted() {
        let registry = registry();
        let header = r#"{"alg":"groth16","circuitId":"auth"}"#;
        assert!(TokenParser::new(&registry)
            .parse(&compact(header, "m", ""))
            .is_ok());
    }

    #[test]
    fn missing_alg_rejected() {
        let registry = registry();
        let header = r#"{"circuitId":"auth"}"#;
        assert!(matches!(
            TokenParser::new(&registry)
                .parse(&compact(header, "m", ""))
                .unwrap_err(),
            JwzError::Header(HeaderError::Missing("alg"))
        ));
    }

    #[test]
    fn non_string_circuit_id_rejected() {
        let registry = registry();
        let header = r#"{"alg":"groth16","circuitId":7}"#;
        assert!(matches!(
            TokenParser::new(&registry)
                .parse(&compact(header, "m", ""))
                .unwrap_err(),
            JwzError::Header(HeaderError::InvalidType { .. })
        ));
    }

    #[test]
    fn unknown_method_rejected() {
        let registry = registry();
        let header = r#"{"alg":"groth16","circuitId":"authV2"}"#;
        match TokenParser::new(&registry)
            .parse(&compact(header, "m", ""))
            .unwrap_err()
        {
            JwzError::UnsupportedMethod(UnsupportedMethod(alg)) => {
                assert_eq!(alg.to_string(), "groth16/authV2")
            }
            other => panic!("expected UnsupportedMethod, got: {other:?}"),
        }
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let registry = ProvingMethodRegistry::new();
        assert!(matches!(
            TokenParser::new(&registry)
                .parse(&compact(AUTH_HEADER, "m", ""))
                .unwrap_err(),
            JwzError::UnsupportedMethod(_)
        ));
    }

    #[test]
    fn malformed_proof_json_rejected() {
        let registry = registry();
        match TokenParser::new(&registry)
            .parse(&compact(AUTH_HEADER, "m", "{\"proof\":"))
            .unwrap_err()
        {
            JwzError::Format(FormatError::InvalidJson { segment, .. }) => {
                assert_eq!(segment, "proof")
            }
            other => panic!("expected InvalidJson, got: {other:?}"),
        }
    }

    #[test]
    fn empty_protected_rejected() {
        let registry = registry();
        assert!(matches!(
            TokenParser::new(&registry).parse("..").unwrap_err(),
            JwzError::Format(FormatError::MissingProtected)
        ));
    }

    #[test]
    fn oversized_input_rejected_before_splitting() {
        let registry = registry();
        let parser = TokenParser::new(&registry).with_limits(ParseLimits {
            max_token_length: 8,
            ..ParseLimits::default()
        });
        assert!(matches!(
            parser.parse("a.b.c.d.e.f").unwrap_err(),
            JwzError::Format(FormatError::TooLarge { segment: "token", .. })
        ));
    }

    #[test]
    fn oversized_payload_rejected() {
        let registry = registry();
        let parser = TokenParser::new(&registry).with_limits(ParseLimits {
            max_payload_bytes: 4,
            ..ParseLimits::default()
        });
        assert!(matches!(
            parser.parse(&compact(AUTH_HEADER, "mymessage", "")).unwrap_err(),
            JwzError::Format(FormatError::TooLarge {
                segment: "payload",
                size: 9,
                max: 4
            })
        ));
    }

    #[test]
    fn full_form_with_missing_payload_reads_empty() {
        let registry = registry();
        let input = format!(
            r#"{{"protected":"{}"}}"#,
            jwz_core::b64_encode(AUTH_HEADER.as_bytes())
        );
        let token = TokenParser::new(&registry).parse(&input).unwrap();
        assert!(token.payload().is_empty());
    }

    #[test]
    fn full_form_malformed_json() {
        let registry = registry();
        assert!(matches!(
            TokenParser::new(&registry).parse("{not json").unwrap_err(),
            JwzError::Format(FormatError::InvalidJson {
                segment: "full serialization",
                ..
            })
        ));
    }

    #[test]
    fn parsed_header_comes_from_protected() {
        let registry = registry();
        let input = format!(
            r#"{{"payload":"bQ==","protected":"{}","header":{{"alg":"plonk"}}}}"#,
            jwz_core::b64_encode(AUTH_HEADER.as_bytes())
        );
        let token = TokenParser::new(&registry).parse(&input).unwrap();
        assert_eq!(token.alg(), "groth16");
        assert_eq!(token.header().alg().unwrap(), "groth16");
    }
}
