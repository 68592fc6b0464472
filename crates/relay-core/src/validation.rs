//! Caller input validation
//!
//! Everything here is pure and runs before any network call, so a bad
//! request never costs an RPC or market round-trip.

use crate::error::{RelayError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use relay_types::{AmountInput, FixedSide, TradeDirection};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::{Pubkey, PUBKEY_BYTES};
use std::str::FromStr;
use tracing::warn;

pub const INVALID_DIRECTION_MESSAGE: &str = "Invalid trade direction. Must be 'BUY' or 'SELL'.";
pub const INVALID_PUBKEY_MESSAGE: &str = "Invalid public key provided for signer or mint address.";
pub const INVALID_BASE64_MESSAGE: &str = "Invalid Base64 string";

/// Accept exactly `"BUY"` or `"SELL"`
pub fn validate_trade_direction(input: &str) -> Result<TradeDirection> {
    TradeDirection::from_str(input)
        .map_err(|_| RelayError::invalid_argument("tradeDirection", INVALID_DIRECTION_MESSAGE))
}

/// Parse signer and mint as base58 public keys that lie on the ed25519 curve.
///
/// Off-curve addresses (program-derived addresses) cannot sign, so they are
/// rejected for both roles.
pub fn validate_public_keys(signer: &str, mint: &str) -> Result<(Pubkey, Pubkey)> {
    let signer = parse_on_curve_pubkey("signerAddress", signer)?;
    let mint = parse_on_curve_pubkey("mintAddress", mint)?;
    Ok((signer, mint))
}

fn parse_on_curve_pubkey(field: &str, value: &str) -> Result<Pubkey> {
    let reject = |reason: String| {
        warn!("Invalid public key provided for {}: {}", field, reason);
        RelayError::invalid_argument(field, INVALID_PUBKEY_MESSAGE)
    };

    let bytes = bs58::decode(value)
        .into_vec()
        .map_err(|e| reject(format!("not base58: {e}")))?;
    let bytes: [u8; PUBKEY_BYTES] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| reject(format!("expected {PUBKEY_BYTES} bytes, got {}", b.len())))?;

    let pubkey = Pubkey::new_from_array(bytes);
    if !pubkey.is_on_curve() {
        return Err(reject(format!("{pubkey} is not on the ed25519 curve")));
    }
    Ok(pubkey)
}

/// Accept `input` only if it is canonical standard base64: decoding and
/// re-encoding must reproduce it byte for byte.
pub fn validate_base64_encoding(input: &str) -> Result<&str> {
    let canonical = STANDARD
        .decode(input)
        .map(|bytes| STANDARD.encode(bytes) == input)
        .unwrap_or(false);

    if !canonical {
        warn!("Invalid Base64 string ({} chars)", input.len());
        return Err(RelayError::invalid_argument(
            "transactionBase64Signed",
            INVALID_BASE64_MESSAGE,
        ));
    }
    Ok(input)
}

/// Token amount in the smallest unit; must be a positive integer
pub fn parse_token_amount(input: Option<&AmountInput>) -> Result<u64> {
    let amount = match input {
        None => {
            return Err(RelayError::invalid_argument(
                "amountLamports",
                "amountLamports is required",
            ))
        }
        Some(AmountInput::Integer(amount)) => *amount,
        Some(AmountInput::Text(text)) => text.trim().parse::<u64>().map_err(|_| {
            RelayError::invalid_argument(
                "amountLamports",
                format!("Invalid amountLamports '{text}'. Must be a non-negative integer."),
            )
        })?,
    };

    if amount == 0 {
        return Err(RelayError::invalid_argument(
            "amountLamports",
            "amountLamports must be greater than zero",
        ));
    }
    Ok(amount)
}

pub fn parse_commitment(input: Option<&str>, default: CommitmentConfig) -> Result<CommitmentConfig> {
    match input {
        None => Ok(default),
        Some(level) => CommitmentConfig::from_str(level).map_err(|_| {
            RelayError::invalid_argument(
                "commitment",
                format!(
                    "Invalid commitment '{level}'. Must be 'processed', 'confirmed' or 'finalized'."
                ),
            )
        }),
    }
}

pub fn parse_fixed_side(input: Option<&str>) -> Result<FixedSide> {
    match input {
        None => Ok(FixedSide::default()),
        Some(side) => FixedSide::from_str(side).map_err(|_| {
            RelayError::invalid_argument(
                "fixedSide",
                format!("Invalid fixed side '{side}'. Must be 'IN' or 'OUT'."),
            )
        }),
    }
}

/// RPC endpoint, defaulting when absent; only http(s) URLs are accepted
pub fn parse_rpc_url(input: Option<&str>, default: &str) -> Result<String> {
    let raw = input.unwrap_or(default);
    let url = reqwest::Url::parse(raw).map_err(|e| {
        RelayError::invalid_argument("rpcUrl", format!("Invalid rpcUrl '{raw}': {e}"))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        scheme => Err(RelayError::invalid_argument(
            "rpcUrl",
            format!("Invalid rpcUrl scheme '{scheme}'. Must be http or https."),
        )),
    }
}
