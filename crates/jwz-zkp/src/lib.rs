//! # jwz-zkp: Proving Methods for JWZ Tokens
//!
//! Defines how a token's message hash becomes a zero-knowledge proof and how
//! that proof is checked, independently of token framing.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): [`ProvingMethod`] is the contract every
//!   (algorithm, circuit) pairing satisfies; [`InputsPreparer`] is the
//!   caller's hook that turns a message hash into circuit inputs.
//!
//! - **Registry** (`registry.rs`): [`ProvingMethodRegistry`] maps
//!   [`ProvingMethodAlg`] keys to shared methods. It is an ordinary value
//!   handed to the parser, not a global.
//!
//! - **Groth16** (`groth16.rs`): [`Groth16Method`] binds a pluggable
//!   [`Groth16Backend`] to a circuit's public-signal layout and enforces the
//!   challenge check ahead of cryptographic verification.
//!
//! - **Circuits** (`circuits/`): typed public-signal records, currently the
//!   `auth` circuit.
//!
//! - **Mock** (`mock.rs`, feature `mock`): [`MockGroth16Backend`], a
//!   deterministic backend with no cryptographic strength.
//!
//! ## Crate Policy
//!
//! - Depends on `jwz-core` and `jwz-crypto` internally.
//! - Real proof-system backends live outside this crate.

pub mod circuits;
pub mod groth16;
#[cfg(feature = "mock")]
pub mod mock;
pub mod proof;
pub mod registry;
pub mod traits;

pub use circuits::{AuthPubSignals, ChallengeSignals, PubSignalsUnmarshaller};
pub use groth16::{Groth16AuthMethod, Groth16Backend, Groth16Method, AUTH_CIRCUIT_ID, GROTH16};
#[cfg(feature = "mock")]
pub use mock::{MockAuthInputs, MockGroth16Backend};
pub use proof::{ProofData, ZkProof};
pub use registry::{ProvingMethodRegistry, UnsupportedMethod};
pub use traits::{InputsPreparer, ProofError, ProvingMethod, ProvingMethodAlg, VerifyError};
