//! # Hash Subcommand
//!
//! Prints the message hash of a token: the value its proof's challenge must
//! equal.

use anyhow::{Context, Result};
use clap::Args;

use jwz_crypto::challenge_to_decimal;
use jwz_token::Token;
use jwz_zkp::ProvingMethodRegistry;

use crate::input::TokenSource;

/// Arguments for `jwz hash`.
#[derive(Args, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub source: TokenSource,

    /// Print 32 bytes of lowercase hex instead of a decimal integer.
    #[arg(long)]
    pub hex: bool,
}

/// Execute the hash subcommand.
pub fn run_hash(args: &HashArgs, registry: &ProvingMethodRegistry) -> Result<u8> {
    let input = args.source.read()?;
    println!("{}", cmd_hash(&input, registry, args.hex)?);
    Ok(0)
}

/// Message hash of `input` in the requested rendering.
pub fn cmd_hash(input: &str, registry: &ProvingMethodRegistry, hex: bool) -> Result<String> {
    let token = Token::parse(input, registry).context("failed to parse token")?;
    let hash = token.message_hash().context("failed to hash token")?;
    tracing::debug!(alg = token.alg(), circuit_id = token.circuit_id(), "computed message hash");
    if hex {
        Ok(hash.iter().map(|b| format!("{b:02x}")).collect())
    } else {
        Ok(challenge_to_decimal(&hash))
    }
}
