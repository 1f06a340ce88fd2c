//! # Inspect Subcommand
//!
//! Decodes a token and prints a JSON summary. Nothing is verified.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use jwz_core::{b64_encode, Header};
use jwz_crypto::challenge_to_decimal;
use jwz_token::Token;
use jwz_zkp::ProvingMethodRegistry;

use crate::input::TokenSource;

/// Arguments for `jwz inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: TokenSource,
}

/// Decoded view of a token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary<'a> {
    pub alg: &'a str,
    pub circuit_id: &'a str,
    pub header: &'a Header,
    /// Payload as text when it is valid UTF-8.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<&'a str>,
    /// Payload as standard base64.
    pub payload_base64: String,
    /// Decimal message hash.
    pub message_hash: String,
    pub proven: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_signals: Option<&'a [String]>,
}

impl<'a> TokenSummary<'a> {
    pub fn of(token: &'a Token) -> Result<Self> {
        let message_hash = token.message_hash().context("failed to hash token")?;
        Ok(Self {
            alg: token.alg(),
            circuit_id: token.circuit_id(),
            header: token.header(),
            payload: std::str::from_utf8(token.payload()).ok(),
            payload_base64: b64_encode(token.payload()),
            message_hash: challenge_to_decimal(&message_hash),
            proven: token.proof().is_some(),
            pub_signals: token.proof().map(|p| p.pub_signals.as_slice()),
        })
    }
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs, registry: &ProvingMethodRegistry) -> Result<u8> {
    let input = args.source.read()?;
    println!("{}", cmd_inspect(&input, registry)?);
    Ok(0)
}

/// Render the summary of `input` as pretty JSON.
pub fn cmd_inspect(input: &str, registry: &ProvingMethodRegistry) -> Result<String> {
    let token = Token::parse(input, registry).context("failed to parse token")?;
    let summary = TokenSummary::of(&token)?;
    serde_json::to_string_pretty(&summary).context("failed to render summary")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mock_registry, prove::cmd_prove};

    #[test]
    fn summarizes_proven_token() {
        let compact = cmd_prove("mymessage", &[], b"pk", "5", "6", false).unwrap();
        let out = cmd_inspect(&compact, &mock_registry()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["alg"], "groth16");
        assert_eq!(value["circuitId"], "auth");
        assert_eq!(value["payload"], "mymessage");
        assert_eq!(value["payloadBase64"], "bXltZXNzYWdl");
        assert_eq!(value["proven"], true);
        assert_eq!(value["pubSignals"][0], value["messageHash"]);
        assert_eq!(value["header"]["typ"], "JWZ");
    }

    #[test]
    fn non_utf8_payload_omits_text() {
        let token = format!(
            "{}.{}.",
            jwz_core::b64url_encode(br#"{"alg":"groth16","circuitId":"auth"}"#),
            jwz_core::b64url_encode(&[0xff, 0xfe])
        );
        let out = cmd_inspect(&token, &mock_registry()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value.get("payload").is_none());
        assert_eq!(value["payloadBase64"], "//4=");
        assert_eq!(value["proven"], false);
        assert!(value.get("pubSignals").is_none());
    }

    #[test]
    fn parse_failure_has_context() {
        let err = cmd_inspect("only.two", &mock_registry()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("failed to parse token"));
        assert!(msg.contains("three segments"));
    }
}
