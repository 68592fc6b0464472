//! Router wired to in-memory collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use relay_api::{create_router, ApiState};
use relay_core::{
    error::{RelayError, Result},
    market::{MarketAdapter, MarketQuote, MarketQuoteRequest},
    rpc::{LatestBlockhash, RpcGateway},
    FeeSchedule, RelayConfig, TradePreparer, TransactionSubmitter,
};
use relay_types::MarketEnvironment;
use serde_json::Value;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::VersionedTransaction,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Default)]
pub struct CountingMarket {
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl CountingMarket {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketAdapter for CountingMarket {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn quote_and_build_instructions(
        &self,
        request: &MarketQuoteRequest,
    ) -> Result<MarketQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RelayError::upstream("market", "curve account not found"));
        }
        Ok(MarketQuote {
            instructions: vec![Instruction::new_with_bytes(
                Pubkey::new_from_array([5u8; 32]),
                &[1, 2, 3],
                vec![
                    AccountMeta::new(request.signer, true),
                    AccountMeta::new_readonly(request.mint, false),
                ],
            )],
            collateral_amount: 1_000_000,
        })
    }
}

#[derive(Default)]
pub struct CountingRpc {
    pub reject_send: bool,
    pub blockhash_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
}

impl CountingRpc {
    pub fn sends(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RpcGateway for CountingRpc {
    async fn latest_blockhash(
        &self,
        _rpc_url: &str,
        _commitment: CommitmentConfig,
    ) -> Result<LatestBlockhash> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(LatestBlockhash {
            blockhash: Hash::new_from_array([1u8; 32]),
            last_valid_block_height: 300,
        })
    }

    async fn send_transaction(
        &self,
        _rpc_url: &str,
        _commitment: CommitmentConfig,
        transaction: &VersionedTransaction,
    ) -> Result<Signature> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_send {
            return Err(RelayError::upstream_with_logs(
                "rpc",
                "Transaction simulation failed: Attempt to debit an account but found no record of a prior credit.",
                vec!["Program 11111111111111111111111111111111 failed".to_string()],
            ));
        }
        Ok(transaction.signatures[0])
    }
}

pub struct TestApp {
    pub router: Router,
    pub market: Arc<CountingMarket>,
    pub rpc: Arc<CountingRpc>,
}

impl TestApp {
    pub fn new(market: CountingMarket, rpc: CountingRpc) -> Self {
        let market = Arc::new(market);
        let rpc = Arc::new(rpc);
        let preparer = TradePreparer::new(
            market.clone(),
            rpc.clone(),
            FeeSchedule::default(),
            MarketEnvironment::Devnet,
        );
        let submitter = TransactionSubmitter::new(rpc.clone());
        let router = create_router(ApiState::new(preparer, submitter, RelayConfig::default()));
        Self {
            router,
            market,
            rpc,
        }
    }

    pub fn healthy() -> Self {
        Self::new(CountingMarket::default(), CountingRpc::default())
    }

    /// POST a raw body and return status plus parsed JSON
    pub async fn post(&self, uri: &str, body: impl Into<String>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

pub fn wallet() -> String {
    Keypair::new().pubkey().to_string()
}
