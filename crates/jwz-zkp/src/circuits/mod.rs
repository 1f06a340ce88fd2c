//! # Circuit Public Signals
//!
//! Each circuit publishes its outputs as an ordered list of decimal strings.
//! A [`PubSignalsUnmarshaller`] turns that list into a typed record, and
//! [`ChallengeSignals`] exposes the one output every token circuit must carry:
//! the challenge that binds the proof to a message hash.

pub mod auth;

use num_bigint::BigUint;

use crate::traits::VerifyError;

pub use auth::{AuthPubSignals, AUTH_SIGNAL_NAMES};

/// Decode a circuit's ordered public signals into a typed record.
pub trait PubSignalsUnmarshaller: Sized {
    /// Parse `signals` in circuit output order.
    ///
    /// # Errors
    ///
    /// [`VerifyError::MalformedProof`] on a wrong signal count or a value that
    /// is not a decimal integer.
    fn from_pub_signals(signals: &[String]) -> Result<Self, VerifyError>;
}

/// Circuit outputs that declare a challenge.
pub trait ChallengeSignals {
    /// The challenge the proof was generated for.
    fn challenge(&self) -> &BigUint;
}

/// Parse one decimal signal, naming it in the error.
pub(crate) fn decimal_signal(name: &str, value: &str) -> Result<BigUint, VerifyError> {
    jwz_crypto::parse_decimal(value).ok_or_else(|| {
        VerifyError::MalformedProof(format!("public signal {name} is not a decimal integer"))
    })
}
