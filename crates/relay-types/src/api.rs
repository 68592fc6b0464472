//! HTTP request and response bodies
//!
//! Request fields are deliberately loose (strings and options) so that every
//! caller mistake reaches the validation layer and is reported with a
//! readable message instead of a generic deserialization rejection.

use serde::{Deserialize, Deserializer, Serialize};

/// Message returned on every successful operation
pub const SUCCESS_MESSAGE: &str = "Success";

/// Token amount as sent by callers: either a JSON integer or a decimal string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Integer(u64),
    Text(String),
}

/// Read a string field, keeping any other JSON value as its JSON text so the
/// validator can reject it by name
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Other(serde_json::Value),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|value| match value {
        Loose::Text(text) => text,
        Loose::Other(other) => other.to_string(),
    }))
}

/// Body of `POST /prepare`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub trade_direction: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub signer_address: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub mint_address: Option<String>,
    #[serde(default)]
    pub amount_lamports: Option<AmountInput>,
    #[serde(default, deserialize_with = "loose_text")]
    pub rpc_url: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub commitment: Option<String>,
    #[serde(default)]
    pub slippage_bps: Option<u64>,
    #[serde(default, deserialize_with = "loose_text")]
    pub fixed_side: Option<String>,
    #[serde(default)]
    pub priority_fee: Option<u64>,
}

/// Body returned by a successful `POST /prepare`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareResponse {
    pub message: String,
    pub transaction_base64: String,
    pub timestamp: String,
}

/// Body of `POST /submit`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub transaction_base64_signed: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub rpc_url: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub commitment: Option<String>,
}

/// Body returned by a successful `POST /submit`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub message: String,
    pub signature: String,
    pub timestamp: String,
}

/// Body returned on any failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
