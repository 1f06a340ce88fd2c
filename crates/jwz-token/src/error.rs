//! Top-level error type for token operations.

use jwz_core::{CanonicalizationError, FormatError, HeaderDecodeError, HeaderError};
use jwz_crypto::HashError;
use jwz_zkp::{ProofError, UnsupportedMethod, VerifyError};
use thiserror::Error;

/// Every failure a token operation can report.
///
/// Verification failures always surface as an `Err`; a successful
/// [`Token::verify`](crate::Token::verify) is the only way to obtain `true`.
#[derive(Error, Debug)]
pub enum JwzError {
    /// Wire data is not a well-formed token.
    #[error("malformed token: {0}")]
    Format(#[from] FormatError),

    /// The protected header is structurally valid JSON but semantically wrong.
    #[error("invalid header: {0}")]
    Header(#[from] HeaderError),

    /// No proving method is registered for the token's algorithm and circuit.
    #[error(transparent)]
    UnsupportedMethod(#[from] UnsupportedMethod),

    /// The message hasher failed.
    #[error("message hash failed: {0}")]
    Hash(#[from] HashError),

    /// The inputs preparer failed or is not attached.
    #[error("circuit input preparation failed: {0:#}")]
    InputPreparation(anyhow::Error),

    /// The proving method failed to produce a proof.
    #[error(transparent)]
    ProofGeneration(#[from] ProofError),

    /// The proof was generated for a different message.
    #[error("challenge mismatch: message hash is {expected}, proof declares {actual}")]
    ChallengeMismatch {
        /// Decimal message hash recomputed from the token.
        expected: String,
        /// Decimal challenge found in the proof.
        actual: String,
    },

    /// The proof failed verification for any reason other than the challenge.
    #[error(transparent)]
    ProofVerification(VerifyError),

    /// Marshaling a token component failed.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A component needed for this operation is absent.
    #[error("token has no {0}")]
    MissingComponent(&'static str),
}

impl From<VerifyError> for JwzError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::ChallengeMismatch { expected, actual } => {
                JwzError::ChallengeMismatch { expected, actual }
            }
            other => JwzError::ProofVerification(other),
        }
    }
}

impl From<HeaderDecodeError> for JwzError {
    fn from(err: HeaderDecodeError) -> Self {
        match err {
            HeaderDecodeError::Format(e) => JwzError::Format(e),
            HeaderDecodeError::Header(e) => JwzError::Header(e),
        }
    }
}

impl From<CanonicalizationError> for JwzError {
    fn from(err: CanonicalizationError) -> Self {
        JwzError::Serialization(err.to_string())
    }
}
