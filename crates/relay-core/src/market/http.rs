//! HTTP client for a market pricing service.
//!
//! The service resolves the curve position, prices the trade and returns the
//! instructions as JSON, in the same `programId` / `accounts` / base64 `data`
//! shape that aggregator swap-instruction APIs use.

use super::{MarketAdapter, MarketQuote, MarketQuoteRequest};
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use relay_types::{AmountInput, FixedSide, MarketEnvironment, TradeDirection};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, instrument};

const ORIGIN: &str = "market";
const QUOTE_PATH: &str = "/quote-instructions";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteInstructionsRequest<'a> {
    mint_address: String,
    signer_address: String,
    token_amount: String,
    trade_direction: TradeDirection,
    slippage_bps: u64,
    fixed_side: FixedSide,
    rpc_url: &'a str,
    commitment: String,
    environment: MarketEnvironment,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteInstructionsResponse {
    collateral_amount: AmountInput,
    instructions: Vec<InstructionData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstructionData {
    program_id: String,
    accounts: Vec<Key>,
    data: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Key {
    pubkey: String,
    is_signer: bool,
    is_writable: bool,
}

impl InstructionData {
    fn into_instruction(self) -> Result<Instruction> {
        let program_id = parse_pubkey(&self.program_id)?;
        let accounts = self
            .accounts
            .iter()
            .map(|k| -> Result<AccountMeta> {
                Ok(AccountMeta {
                    pubkey: parse_pubkey(&k.pubkey)?,
                    is_signer: k.is_signer,
                    is_writable: k.is_writable,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let data = STANDARD.decode(&self.data).map_err(|e| {
            RelayError::upstream(ORIGIN, format!("Instruction data is not base64: {e}"))
        })?;
        Ok(Instruction {
            program_id,
            accounts,
            data,
        })
    }
}

fn parse_pubkey(value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value)
        .map_err(|e| RelayError::upstream(ORIGIN, format!("Invalid pubkey {value}: {e}")))
}

fn parse_collateral(amount: AmountInput) -> Result<u64> {
    match amount {
        AmountInput::Integer(value) => Ok(value),
        AmountInput::Text(text) => text.parse::<u64>().map_err(|_| {
            RelayError::upstream(ORIGIN, format!("Invalid collateral amount '{text}'"))
        }),
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Market adapter backed by a pricing service reachable over HTTP
#[derive(Debug, Clone)]
pub struct HttpMarketAdapter {
    base_url: String,
    timeout: Duration,
}

impl HttpMarketAdapter {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// A fresh client per quote so no connection outlives its request
    fn client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(json_headers())
            .build()
            .map_err(|e| RelayError::internal(format!("Failed to build HTTP client: {e}")))
    }
}

#[async_trait]
impl MarketAdapter for HttpMarketAdapter {
    fn name(&self) -> &'static str {
        "http"
    }

    #[instrument(skip(self, request), fields(mint = %request.mint, direction = %request.direction))]
    async fn quote_and_build_instructions(
        &self,
        request: &MarketQuoteRequest,
    ) -> Result<MarketQuote> {
        let body = QuoteInstructionsRequest {
            mint_address: request.mint.to_string(),
            signer_address: request.signer.to_string(),
            token_amount: request.token_amount.to_string(),
            trade_direction: request.direction,
            slippage_bps: request.slippage_bps,
            fixed_side: request.fixed_side,
            rpc_url: &request.rpc_url,
            commitment: request.commitment.commitment.to_string(),
            environment: request.environment,
        };

        let url = format!("{}{}", self.base_url, QUOTE_PATH);
        debug!("Requesting market quote from {}", url);

        let response = self
            .client()?
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::from_http(ORIGIN, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RelayError::upstream(
                ORIGIN,
                format!("Market service returned {status}: {text}"),
            ));
        }

        let quote: QuoteInstructionsResponse = response
            .json()
            .await
            .map_err(|e| RelayError::upstream(ORIGIN, format!("Malformed market response: {e}")))?;

        let collateral_amount = parse_collateral(quote.collateral_amount)?;
        let instructions = quote
            .instructions
            .into_iter()
            .map(InstructionData::into_instruction)
            .collect::<Result<Vec<_>>>()?;

        if instructions.is_empty() {
            return Err(RelayError::upstream(
                ORIGIN,
                "No instructions in market response",
            ));
        }

        Ok(MarketQuote {
            instructions,
            collateral_amount,
        })
    }
}
