//! Bonding-curve market collaborator
//!
//! Pricing and curve math live behind the `MarketAdapter` trait. The pipeline
//! only consumes what an adapter returns: the market instructions for the
//! trade and the collateral amount the curve priced it at.

use crate::error::Result;
use async_trait::async_trait;
use relay_types::{FixedSide, MarketEnvironment, TradeDirection};
use solana_sdk::{commitment_config::CommitmentConfig, instruction::Instruction, pubkey::Pubkey};

pub mod http;

pub use http::HttpMarketAdapter;

/// Everything a market needs to price a trade and build its instructions
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuoteRequest {
    pub mint: Pubkey,
    pub signer: Pubkey,
    pub token_amount: u64,
    pub direction: TradeDirection,
    pub slippage_bps: u64,
    pub fixed_side: FixedSide,
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub environment: MarketEnvironment,
}

/// Priced trade as returned by a market
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuote {
    pub instructions: Vec<Instruction>,
    /// Counter-asset amount in its smallest unit
    pub collateral_amount: u64,
}

#[async_trait]
pub trait MarketAdapter: Send + Sync {
    /// Adapter name for logs
    fn name(&self) -> &'static str;

    /// Price the trade at the current curve position and build its
    /// instructions. Any failure must surface as `RelayError::UpstreamFailure`.
    async fn quote_and_build_instructions(&self, request: &MarketQuoteRequest)
        -> Result<MarketQuote>;
}
