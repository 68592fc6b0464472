//! `/submit` pipeline: validate, decode, broadcast

use crate::assembler::deserialize_transaction;
use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::rpc::RpcGateway;
use crate::validation::{
    parse_commitment, parse_rpc_url, validate_base64_encoding, INVALID_BASE64_MESSAGE,
};
use relay_types::SubmitRequest;
use solana_sdk::{
    commitment_config::CommitmentConfig, signature::Signature, transaction::VersionedTransaction,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// A signed transaction that has been decoded and is ready to broadcast
#[derive(Debug, Clone)]
pub struct SignedSubmission {
    pub transaction: VersionedTransaction,
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
}

impl SignedSubmission {
    /// Validate and decode the wire request. Pure: no network access.
    pub fn from_request(request: &SubmitRequest, config: &RelayConfig) -> Result<Self> {
        let encoded = request.transaction_base64_signed.as_deref().ok_or_else(|| {
            RelayError::invalid_argument("transactionBase64Signed", INVALID_BASE64_MESSAGE)
        })?;
        let encoded = validate_base64_encoding(encoded)?;

        Ok(Self {
            transaction: deserialize_transaction(encoded)?,
            rpc_url: parse_rpc_url(request.rpc_url.as_deref(), &config.default_rpc_url)?,
            commitment: parse_commitment(request.commitment.as_deref(), config.default_commitment)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub signature: Signature,
    pub timestamp: String,
}

/// Forwards client-signed transactions to the network
#[derive(Clone)]
pub struct TransactionSubmitter {
    rpc: Arc<dyn RpcGateway>,
}

impl TransactionSubmitter {
    pub fn new(rpc: Arc<dyn RpcGateway>) -> Self {
        Self { rpc }
    }

    #[instrument(skip(self, submission), fields(rpc_url = %submission.rpc_url))]
    pub async fn submit(&self, submission: &SignedSubmission) -> Result<SubmissionResult> {
        let signature = self
            .rpc
            .send_transaction(
                &submission.rpc_url,
                submission.commitment,
                &submission.transaction,
            )
            .await?;

        info!("Submitted transaction {}", signature);
        Ok(SubmissionResult {
            signature,
            timestamp: crate::timestamp(),
        })
    }

    /// Validate, decode and broadcast in one step
    pub async fn submit_request(
        &self,
        request: &SubmitRequest,
        config: &RelayConfig,
    ) -> Result<SubmissionResult> {
        let submission = SignedSubmission::from_request(request, config)?;
        self.submit(&submission).await
    }
}
