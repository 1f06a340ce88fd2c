//! Outputs of the `auth` circuit: `[challenge, userState, userID]`.

use num_bigint::BigUint;

use super::{decimal_signal, ChallengeSignals, PubSignalsUnmarshaller};
use crate::traits::VerifyError;

/// Signal names in circuit output order.
pub const AUTH_SIGNAL_NAMES: [&str; 3] = ["challenge", "userState", "userID"];

/// Typed public signals of the `auth` circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPubSignals {
    /// Challenge the proof was generated for.
    pub challenge: BigUint,
    /// Hash of the prover's identity state.
    pub user_state: BigUint,
    /// Prover identifier.
    pub user_id: BigUint,
}

impl PubSignalsUnmarshaller for AuthPubSignals {
    fn from_pub_signals(signals: &[String]) -> Result<Self, VerifyError> {
        let [challenge, user_state, user_id] = signals else {
            return Err(VerifyError::MalformedProof(format!(
                "auth circuit expects {} public signals, got {}",
                AUTH_SIGNAL_NAMES.len(),
                signals.len()
            )));
        };
        Ok(Self {
            challenge: decimal_signal(AUTH_SIGNAL_NAMES[0], challenge)?,
            user_state: decimal_signal(AUTH_SIGNAL_NAMES[1], user_state)?,
            user_id: decimal_signal(AUTH_SIGNAL_NAMES[2], user_id)?,
        })
    }
}

impl ChallengeSignals for AuthPubSignals {
    fn challenge(&self) -> &BigUint {
        &self.challenge
    }
}
