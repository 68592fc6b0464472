//! `/prepare` pipeline: validate, quote, charge the fee, assemble

use crate::assembler::{assemble, InstructionBundle, PreparedTransaction};
use crate::config::RelayConfig;
use crate::constants::defaults::SLIPPAGE_BPS;
use crate::error::{RelayError, Result};
use crate::fees::{build_fee_instruction, compute_fee, FeeSchedule};
use crate::market::{MarketAdapter, MarketQuoteRequest};
use crate::priority::build_priority_instruction;
use crate::rpc::RpcGateway;
use crate::validation::{
    self, parse_commitment, parse_fixed_side, parse_rpc_url, parse_token_amount,
    validate_public_keys, validate_trade_direction,
};
use relay_types::{FixedSide, MarketEnvironment, PrepareRequest, TradeDirection};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::sync::Arc;
use tracing::{info, instrument};

/// A fully validated trade. Only constructible through `from_request`.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    pub direction: TradeDirection,
    pub signer: Pubkey,
    pub mint: Pubkey,
    pub token_amount: u64,
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub slippage_bps: u64,
    pub fixed_side: FixedSide,
    pub priority_fee: Option<u64>,
}

impl TradeRequest {
    /// Validate and coerce the wire request. Pure: no network access.
    pub fn from_request(request: &PrepareRequest, config: &RelayConfig) -> Result<Self> {
        let direction = validate_trade_direction(request.trade_direction.as_deref().unwrap_or(""))?;

        let (signer, mint) = match (&request.signer_address, &request.mint_address) {
            (Some(signer), Some(mint)) => validate_public_keys(signer, mint)?,
            _ => {
                return Err(RelayError::invalid_argument(
                    "signerAddress",
                    validation::INVALID_PUBKEY_MESSAGE,
                ))
            }
        };

        Ok(Self {
            direction,
            signer,
            mint,
            token_amount: parse_token_amount(request.amount_lamports.as_ref())?,
            rpc_url: parse_rpc_url(request.rpc_url.as_deref(), &config.default_rpc_url)?,
            commitment: parse_commitment(request.commitment.as_deref(), config.default_commitment)?,
            slippage_bps: request.slippage_bps.unwrap_or(SLIPPAGE_BPS),
            fixed_side: parse_fixed_side(request.fixed_side.as_deref())?,
            priority_fee: request.priority_fee,
        })
    }

    fn quote_request(&self, environment: MarketEnvironment) -> MarketQuoteRequest {
        MarketQuoteRequest {
            mint: self.mint,
            signer: self.signer,
            token_amount: self.token_amount,
            direction: self.direction,
            slippage_bps: self.slippage_bps,
            fixed_side: self.fixed_side,
            rpc_url: self.rpc_url.clone(),
            commitment: self.commitment,
            environment,
        }
    }
}

/// Builds unsigned trade transactions
#[derive(Clone)]
pub struct TradePreparer {
    market: Arc<dyn MarketAdapter>,
    rpc: Arc<dyn RpcGateway>,
    fees: FeeSchedule,
    environment: MarketEnvironment,
}

impl TradePreparer {
    pub fn new(
        market: Arc<dyn MarketAdapter>,
        rpc: Arc<dyn RpcGateway>,
        fees: FeeSchedule,
        environment: MarketEnvironment,
    ) -> Self {
        Self {
            market,
            rpc,
            fees,
            environment,
        }
    }

    /// Quote the trade, then assemble [priority, fee, market...] against a
    /// freshly fetched blockhash.
    #[instrument(skip(self, trade), fields(direction = %trade.direction, mint = %trade.mint))]
    pub async fn prepare(&self, trade: &TradeRequest) -> Result<PreparedTransaction> {
        let quote = self
            .market
            .quote_and_build_instructions(&trade.quote_request(self.environment))
            .await?;
        info!(
            "Market '{}' quoted collateral amount {} with {} instruction(s)",
            self.market.name(),
            quote.collateral_amount,
            quote.instructions.len()
        );

        let fee = compute_fee(
            &self.fees,
            trade.direction,
            trade.token_amount,
            quote.collateral_amount,
        );
        info!(
            "Protocol fee {} on source amount {}",
            fee.amount, fee.source_amount
        );

        let bundle = InstructionBundle {
            priority: build_priority_instruction(trade.priority_fee),
            fee: build_fee_instruction(&self.fees, &trade.signer, fee.amount),
            market: quote.instructions,
        };

        let blockhash = self
            .rpc
            .latest_blockhash(&trade.rpc_url, trade.commitment)
            .await?;

        let prepared = assemble(&trade.signer, bundle, blockhash)?;
        info!(
            "Prepared transaction with {} instruction(s), valid until block height {}",
            prepared.instructions.len(),
            prepared.last_valid_block_height
        );
        Ok(prepared)
    }

    /// Validate, prepare and encode in one step
    pub async fn prepare_base64(
        &self,
        request: &PrepareRequest,
        config: &RelayConfig,
    ) -> Result<String> {
        let trade = TradeRequest::from_request(request, config)?;
        self.prepare(&trade).await?.to_base64()
    }
}
