//! # jwz-cli: CLI Tool for JWZ Tokens
//!
//! Provides the `jwz` command-line interface over `jwz-token`.
//!
//! ## Subcommands
//!
//! - `jwz inspect`: Decode a token and print its header, payload and signals.
//! - `jwz hash`: Print the message hash a proof must commit to.
//! - `jwz convert`: Convert between compact and full serialization.
//! - `jwz prove`: Create and prove a token with the mock Groth16 backend.
//! - `jwz verify`: Verify a token with the mock Groth16 backend.
//!
//! Tokens are read from a file argument, or from stdin when the argument is
//! omitted or `-`:
//!
//! ```bash
//! jwz prove --payload mymessage --proving-key auth.pk > token.jwz
//! jwz verify token.jwz --proving-key auth.pk
//! jwz convert --to full < token.jwz
//! ```
//!
//! The mock backend has no cryptographic strength. It is here so tokens can
//! be produced and checked end to end without a circuit toolchain.

pub mod convert;
pub mod hash;
pub mod input;
pub mod inspect;
pub mod prove;
pub mod verify;

use std::sync::Arc;

use jwz_zkp::{Groth16AuthMethod, MockGroth16Backend, ProvingMethod, ProvingMethodRegistry};

/// The `groth16`/`auth` method over the mock backend.
pub fn mock_auth_method() -> Arc<dyn ProvingMethod> {
    Arc::new(Groth16AuthMethod::auth(Arc::new(MockGroth16Backend::auth())))
}

/// A registry holding every method the CLI can parse.
pub fn mock_registry() -> ProvingMethodRegistry {
    let registry = ProvingMethodRegistry::new();
    registry.register(mock_auth_method());
    registry
}
