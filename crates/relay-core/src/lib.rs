//! Relay Core
//!
//! Prepares unsigned bonding-curve trade transactions and forwards their
//! client-signed versions to a Solana RPC endpoint.
//! - `validation` checks caller input before any network call
//! - `market` prices the trade and supplies its instructions
//! - `fees` and `priority` build the two relay-owned instructions
//! - `assembler` orders, compiles and encodes the transaction
//! - `prepare` and `submit` drive the two pipelines

pub mod assembler;
pub mod config;
pub mod constants;
pub mod error;
pub mod fees;
pub mod market;
pub mod prepare;
pub mod priority;
pub mod rpc;
pub mod submit;
pub mod validation;

// Re-export main types for convenience
pub use assembler::{deserialize_transaction, serialize_transaction, PreparedTransaction};
pub use config::RelayConfig;
pub use error::{ErrorSeverity, RelayError, Result};
pub use fees::{Fee, FeeSchedule};
pub use market::{HttpMarketAdapter, MarketAdapter, MarketQuote, MarketQuoteRequest};
pub use prepare::{TradePreparer, TradeRequest};
pub use rpc::{LatestBlockhash, RpcGateway, SolanaRpcGateway};
pub use submit::{SignedSubmission, SubmissionResult, TransactionSubmitter};

use chrono::{SecondsFormat, Utc};

/// Current UTC time as ISO-8601 with millisecond precision, e.g.
/// `2024-05-01T12:00:00.000Z`
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
