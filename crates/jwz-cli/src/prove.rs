//! # Prove Subcommand
//!
//! Creates a `groth16`/`auth` token over the mock backend and prints it.
//! The circuit inputs are the message hash plus the user state and user ID
//! given on the command line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;

use jwz_token::Token;
use jwz_zkp::MockAuthInputs;

use crate::input::{read_key, read_payload};
use crate::mock_auth_method;

/// Arguments for `jwz prove`.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Payload text.
    #[arg(long, conflicts_with = "payload_file")]
    pub payload: Option<String>,

    /// Read the payload from a file, byte for byte.
    #[arg(long, value_name = "FILE")]
    pub payload_file: Option<PathBuf>,

    /// Proving key file.
    #[arg(long, value_name = "FILE")]
    pub proving_key: PathBuf,

    /// Decimal user state published by the auth circuit.
    #[arg(long, default_value = "0")]
    pub user_state: String,

    /// Decimal user ID published by the auth circuit.
    #[arg(long, default_value = "0")]
    pub user_id: String,

    /// Extra protected header as KEY=VALUE. Repeatable.
    #[arg(long = "header", value_name = "KEY=VALUE")]
    pub headers: Vec<String>,

    /// Print the full (JSON) form instead of the compact form.
    #[arg(long)]
    pub full: bool,
}

/// Execute the prove subcommand.
pub fn run_prove(args: &ProveArgs) -> Result<u8> {
    let payload = match (&args.payload, &args.payload_file) {
        (Some(text), _) => text.clone().into_bytes(),
        (None, Some(path)) => read_payload(path)?,
        (None, None) => bail!("one of --payload or --payload-file is required"),
    };
    let proving_key = read_key(&args.proving_key)?;
    let out = cmd_prove(
        payload,
        &args.headers,
        &proving_key,
        &args.user_state,
        &args.user_id,
        args.full,
    )?;
    println!("{out}");
    Ok(0)
}

/// Prove `payload` and return the serialized token.
pub fn cmd_prove(
    payload: impl Into<Vec<u8>>,
    headers: &[String],
    proving_key: &[u8],
    user_state: &str,
    user_id: &str,
    full: bool,
) -> Result<String> {
    let preparer = Arc::new(MockAuthInputs::new(user_state, user_id));
    let mut token = Token::new_with_payload(mock_auth_method(), payload, preparer);
    for header in headers {
        let (key, value) = header
            .split_once('=')
            .with_context(|| format!("header must be KEY=VALUE, got {header:?}"))?;
        token.set_header(key, value);
    }

    let compact = token.prove(proving_key, &[]).context("failed to prove token")?;
    tracing::info!(alg = token.alg(), circuit_id = token.circuit_id(), "proved token");
    if full {
        token.full_serialize().context("failed to serialize token")
    } else {
        Ok(compact)
    }
}
