//! # jwz CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jwz_cli::convert::{run_convert, ConvertArgs};
use jwz_cli::hash::{run_hash, HashArgs};
use jwz_cli::inspect::{run_inspect, InspectArgs};
use jwz_cli::prove::{run_prove, ProveArgs};
use jwz_cli::verify::{run_verify, VerifyArgs};

/// JSON Web Zero-knowledge token toolchain.
///
/// Inspects, hashes and converts JWZ tokens, and proves or verifies them
/// with a deterministic mock Groth16 backend.
#[derive(Parser, Debug)]
#[command(name = "jwz", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a token and print its header, payload and public signals.
    Inspect(InspectArgs),

    /// Print the message hash a token's proof must commit to.
    Hash(HashArgs),

    /// Convert a token between compact and full serialization.
    Convert(ConvertArgs),

    /// Create and prove a groth16/auth token with the mock backend.
    Prove(ProveArgs),

    /// Verify a token with the mock backend.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let registry = jwz_cli::mock_registry();
    tracing::debug!(methods = registry.len(), "jwz CLI starting");

    let result = match &cli.command {
        Commands::Inspect(args) => run_inspect(args, &registry),
        Commands::Hash(args) => run_hash(args, &registry),
        Commands::Convert(args) => run_convert(args, &registry),
        Commands::Prove(args) => run_prove(args),
        Commands::Verify(args) => run_verify(args, &registry),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
