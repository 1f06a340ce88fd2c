//! # Convert Subcommand
//!
//! Re-serializes a token in compact or full form. The input form is detected
//! automatically.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use jwz_token::Token;
use jwz_zkp::ProvingMethodRegistry;

use crate::input::TokenSource;

/// Output serialization.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Three dot-separated base64url segments.
    Compact,
    /// JSON object.
    Full,
}

/// Arguments for `jwz convert`.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: TokenSource,

    /// Target serialization.
    #[arg(long, value_enum)]
    pub to: Form,
}

/// Execute the convert subcommand.
pub fn run_convert(args: &ConvertArgs, registry: &ProvingMethodRegistry) -> Result<u8> {
    let input = args.source.read()?;
    println!("{}", cmd_convert(&input, registry, args.to)?);
    Ok(0)
}

/// Serialize `input` in `form`.
pub fn cmd_convert(input: &str, registry: &ProvingMethodRegistry, form: Form) -> Result<String> {
    let token = Token::parse(input, registry).context("failed to parse token")?;
    match form {
        Form::Compact => token
            .compact_serialize()
            .context("token cannot be written in compact form"),
        Form::Full => token.full_serialize().context("failed to serialize token"),
    }
}
