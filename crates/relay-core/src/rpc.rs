//! Solana RPC access
//!
//! The endpoint is chosen per request, so the gateway opens a client for each
//! call and drops it when the call returns.

use crate::error::{RelayError, Result};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, signature::Signature,
    transaction::VersionedTransaction,
};
use solana_transaction_status::UiTransactionEncoding;
use std::time::Duration;
use tracing::{debug, info, instrument};

const ORIGIN: &str = "rpc";

/// A recent blockhash together with the last block height it is valid for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestBlockhash {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

#[async_trait]
pub trait RpcGateway: Send + Sync {
    /// Fetch a fresh blockhash at `commitment`. Never cached.
    async fn latest_blockhash(
        &self,
        rpc_url: &str,
        commitment: CommitmentConfig,
    ) -> Result<LatestBlockhash>;

    /// Broadcast a signed transaction with preflight simulation at
    /// `commitment` and the node's bounded retry budget.
    async fn send_transaction(
        &self,
        rpc_url: &str,
        commitment: CommitmentConfig,
        transaction: &VersionedTransaction,
    ) -> Result<Signature>;
}

/// `RpcGateway` over the nonblocking Solana RPC client
#[derive(Debug, Clone)]
pub struct SolanaRpcGateway {
    timeout: Duration,
    max_retries: usize,
}

impl SolanaRpcGateway {
    pub fn new(timeout: Duration, max_retries: usize) -> Self {
        Self {
            timeout,
            max_retries,
        }
    }

    fn client(&self, rpc_url: &str, commitment: CommitmentConfig) -> RpcClient {
        RpcClient::new_with_timeout_and_commitment(rpc_url.to_string(), self.timeout, commitment)
    }

    pub fn send_config(&self, commitment: CommitmentConfig) -> RpcSendTransactionConfig {
        RpcSendTransactionConfig {
            skip_preflight: false,
            preflight_commitment: Some(commitment.commitment),
            encoding: Some(UiTransactionEncoding::Base64),
            max_retries: Some(self.max_retries),
            ..RpcSendTransactionConfig::default()
        }
    }
}

#[async_trait]
impl RpcGateway for SolanaRpcGateway {
    #[instrument(skip(self))]
    async fn latest_blockhash(
        &self,
        rpc_url: &str,
        commitment: CommitmentConfig,
    ) -> Result<LatestBlockhash> {
        let client = self.client(rpc_url, commitment);
        let (blockhash, last_valid_block_height) = client
            .get_latest_blockhash_with_commitment(commitment)
            .await
            .map_err(|e| RelayError::from_rpc(ORIGIN, e))?;

        debug!(
            "Fetched blockhash {} valid until height {}",
            blockhash, last_valid_block_height
        );
        Ok(LatestBlockhash {
            blockhash,
            last_valid_block_height,
        })
    }

    #[instrument(skip(self, transaction))]
    async fn send_transaction(
        &self,
        rpc_url: &str,
        commitment: CommitmentConfig,
        transaction: &VersionedTransaction,
    ) -> Result<Signature> {
        let client = self.client(rpc_url, commitment);
        let signature = client
            .send_transaction_with_config(transaction, self.send_config(commitment))
            .await
            .map_err(|e| RelayError::from_rpc(ORIGIN, e))?;

        info!("Transaction sent with signature: {}", signature);
        Ok(signature)
    }
}
