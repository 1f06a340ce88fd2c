//! # Verify Subcommand
//!
//! Verifies a token against the mock Groth16 backend. The verification key is
//! read from a file, or derived from the proving key.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jwz_token::{JwzError, Token};
use jwz_zkp::{MockGroth16Backend, ProvingMethodRegistry};

use crate::input::{read_key, TokenSource};

/// Arguments for `jwz verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub source: TokenSource,

    /// Verification key file.
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "proving_key",
        required_unless_present = "proving_key"
    )]
    pub verification_key: Option<PathBuf>,

    /// Derive the verification key from this proving key file.
    #[arg(long, value_name = "FILE")]
    pub proving_key: Option<PathBuf>,
}

/// Execute the verify subcommand.
///
/// Exit code 0 when the token verifies, 1 when it does not.
pub fn run_verify(args: &VerifyArgs, registry: &ProvingMethodRegistry) -> Result<u8> {
    let input = args.source.read()?;
    let verification_key = match (&args.verification_key, &args.proving_key) {
        (Some(path), _) => read_key(path)?,
        (None, Some(path)) => MockGroth16Backend::verification_key_for(&read_key(path)?),
        (None, None) => anyhow::bail!("one of --verification-key or --proving-key is required"),
    };

    match cmd_verify(&input, registry, &verification_key)? {
        Ok(()) => {
            println!("OK: token verified");
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}

/// Parse and verify `input`.
///
/// The outer `Result` fails when the token cannot be parsed; the inner one
/// carries the verification outcome.
pub fn cmd_verify(
    input: &str,
    registry: &ProvingMethodRegistry,
    verification_key: &[u8],
) -> Result<Result<(), JwzError>> {
    let token = Token::parse(input, registry).context("failed to parse token")?;
    Ok(token.verify(verification_key).map(|_| ()))
}
