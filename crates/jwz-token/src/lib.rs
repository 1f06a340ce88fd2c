//! # jwz-token: JSON Web Zero-knowledge Tokens
//!
//! A JWZ token binds a payload to a zero-knowledge proof instead of a
//! signature. The token framing mirrors JWS: a protected header, a payload
//! and a proof, serialized either as three dot-separated base64url segments
//! (compact form) or as a JSON object (full form).
//!
//! ```text
//! base64url(protected) . base64url(payload) . base64url(proof JSON)
//! ```
//!
//! The proof's public signals carry a challenge equal to the hash of
//! `base64url(header).base64url(payload)`; verification recomputes that hash
//! and rejects the proof if the two differ, then hands the proof to the
//! proving method's verifier.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use jwz_token::Token;
//! use jwz_zkp::{Groth16AuthMethod, MockAuthInputs, MockGroth16Backend, ProvingMethodRegistry};
//!
//! let method = Arc::new(Groth16AuthMethod::auth(Arc::new(MockGroth16Backend::auth())));
//! let registry = ProvingMethodRegistry::new();
//! registry.register(method.clone());
//!
//! let mut token = Token::new_with_payload(method, "mymessage", Arc::new(MockAuthInputs::new("1", "2")));
//! let compact = token.prove(b"proving key", b"").unwrap();
//!
//! let parsed = Token::parse(&compact, &registry).unwrap();
//! let vk = MockGroth16Backend::verification_key_for(b"proving key");
//! assert!(parsed.verify(&vk).unwrap());
//! ```

pub mod error;
pub mod limits;
pub mod parser;
pub mod raw;
pub mod token;

pub use error::JwzError;
pub use limits::ParseLimits;
pub use parser::TokenParser;
pub use raw::RawToken;
pub use token::Token;
