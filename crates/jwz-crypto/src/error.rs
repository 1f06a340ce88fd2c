//! # Hashing Error Types

use thiserror::Error;

/// Errors from computing a message hash.
#[derive(Error, Debug)]
pub enum HashError {
    /// The Poseidon permutation could not be set up or applied.
    #[error("poseidon hash failed: {0}")]
    Poseidon(String),
}
