//! Test doubles for the market and RPC collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use relay_core::error::{RelayError, Result};
use relay_core::market::{MarketAdapter, MarketQuote, MarketQuoteRequest};
use relay_core::rpc::{LatestBlockhash, RpcGateway};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::VersionedTransaction,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Program id the stub market builds its instructions for
pub fn stub_program() -> Pubkey {
    Pubkey::new_from_array([7u8; 32])
}

/// Market that answers with a fixed quote and counts its calls
pub struct StubMarket {
    pub collateral_amount: u64,
    pub fail: bool,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<MarketQuoteRequest>>,
}

impl StubMarket {
    pub fn quoting(collateral_amount: u64) -> Self {
        Self {
            collateral_amount,
            fail: false,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::quoting(0)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketAdapter for StubMarket {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn quote_and_build_instructions(
        &self,
        request: &MarketQuoteRequest,
    ) -> Result<MarketQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if self.fail {
            return Err(RelayError::upstream("market", "insufficient liquidity"));
        }

        let curve_account = Pubkey::new_from_array([9u8; 32]);
        let instructions = vec![Instruction::new_with_bytes(
            stub_program(),
            &request.token_amount.to_le_bytes(),
            vec![
                AccountMeta::new(request.signer, true),
                AccountMeta::new(curve_account, false),
                AccountMeta::new_readonly(request.mint, false),
            ],
        )];
        Ok(MarketQuote {
            instructions,
            collateral_amount: self.collateral_amount,
        })
    }
}

/// What a stub gateway does when asked to send
pub enum SendOutcome {
    Accept,
    Reject,
    Unreachable,
}

/// RPC gateway with a fixed blockhash and scripted send behaviour
pub struct StubRpc {
    pub blockhash: Hash,
    pub outcome: SendOutcome,
    pub blockhash_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    pub last_commitment: Mutex<Option<CommitmentConfig>>,
}

impl StubRpc {
    pub fn new(outcome: SendOutcome) -> Self {
        Self {
            blockhash: Hash::new_from_array([42u8; 32]),
            outcome,
            blockhash_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
            last_commitment: Mutex::new(None),
        }
    }

    pub fn sends(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn blockhash_fetches(&self) -> usize {
        self.blockhash_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RpcGateway for StubRpc {
    async fn latest_blockhash(
        &self,
        _rpc_url: &str,
        commitment: CommitmentConfig,
    ) -> Result<LatestBlockhash> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_commitment.lock().unwrap() = Some(commitment);
        Ok(LatestBlockhash {
            blockhash: self.blockhash,
            last_valid_block_height: 150,
        })
    }

    async fn send_transaction(
        &self,
        _rpc_url: &str,
        commitment: CommitmentConfig,
        transaction: &VersionedTransaction,
    ) -> Result<Signature> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_commitment.lock().unwrap() = Some(commitment);
        match self.outcome {
            SendOutcome::Accept => Ok(transaction.signatures[0]),
            SendOutcome::Reject => Err(RelayError::upstream_with_logs(
                "rpc",
                "Transaction simulation failed: Blockhash not found",
                vec!["Program log: expired".to_string()],
            )),
            SendOutcome::Unreachable => Err(RelayError::transient("rpc", "connection refused")),
        }
    }
}

/// A fresh on-curve address
pub fn wallet() -> Pubkey {
    Keypair::new().pubkey()
}
