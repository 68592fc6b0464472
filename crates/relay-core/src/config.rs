//! Environment variable configuration
//!
//! Values are read once at process start. Every variable has a default and
//! unparsable values fall back to that default with a warning.

use crate::constants::{self, defaults, logging as log_defaults, network as net_defaults};
use crate::fees::FeeSchedule;
use relay_types::MarketEnvironment;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

fn parsed_var<T: FromStr>(key: &str, default: T) -> T {
    match dotenvy::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring unparsable {}={:?}, using default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

/// Server binding
pub mod server {
    use super::*;

    /// Get the bind host from environment or use default
    pub fn host() -> String {
        dotenvy::var("HOST").unwrap_or_else(|_| net_defaults::HOST.to_string())
    }

    /// Get the listening port from environment or use default
    pub fn port() -> u16 {
        parsed_var("PORT", net_defaults::PORT)
    }
}

/// RPC endpoint configuration
pub mod rpc {
    use super::*;

    /// RPC URL used when a request does not name one
    pub fn default_url() -> String {
        dotenvy::var("DEFAULT_RPC_URL").unwrap_or_else(|_| defaults::RPC_URL.to_string())
    }

    /// Commitment used when a request does not name one
    pub fn default_commitment() -> CommitmentConfig {
        parsed_var("DEFAULT_COMMITMENT", CommitmentConfig::confirmed())
    }

    pub fn timeout_seconds() -> u64 {
        parsed_var("RPC_TIMEOUT_SECONDS", net_defaults::RPC_TIMEOUT_SECONDS)
    }

    pub fn send_max_retries() -> usize {
        parsed_var("SEND_MAX_RETRIES", defaults::SEND_MAX_RETRIES)
    }
}

/// Market pricing service configuration
pub mod market {
    use super::*;

    pub fn api_url() -> String {
        dotenvy::var("MARKET_API_URL").unwrap_or_else(|_| net_defaults::MARKET_API_URL.to_string())
    }

    pub fn environment() -> MarketEnvironment {
        parsed_var("MARKET_ENVIRONMENT", MarketEnvironment::Devnet)
    }

    pub fn timeout_seconds() -> u64 {
        parsed_var("MARKET_TIMEOUT_SECONDS", net_defaults::MARKET_TIMEOUT_SECONDS)
    }
}

/// Protocol fee configuration
pub mod fees {
    use super::*;

    pub fn wallet() -> Pubkey {
        parsed_var("FEE_WALLET", constants::fee_wallet())
    }

    /// Fee rate in basis points, at most `BPS_DENOMINATOR`
    pub fn bps() -> u64 {
        let bps = parsed_var("FEE_BPS", constants::FEE_BPS);
        if bps > constants::BPS_DENOMINATOR {
            warn!(
                "Ignoring FEE_BPS={} above {}, using default",
                bps,
                constants::BPS_DENOMINATOR
            );
            return constants::FEE_BPS;
        }
        bps
    }
}

/// Logging configuration
pub mod logging {
    use super::*;

    /// Get the RUST_LOG filter directive
    pub fn rust_log_filter() -> String {
        dotenvy::var("RUST_LOG").unwrap_or_else(|_| log_defaults::RUST_LOG.to_string())
    }

    pub fn log_file() -> String {
        dotenvy::var("LOG_FILE").unwrap_or_else(|_| log_defaults::LOG_FILE.to_string())
    }
}

/// Process-wide configuration, captured once at start-up
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub default_rpc_url: String,
    pub default_commitment: CommitmentConfig,
    pub fee_schedule: FeeSchedule,
    pub market_api_url: String,
    pub market_environment: MarketEnvironment,
    pub rpc_timeout: Duration,
    pub market_timeout: Duration,
    pub send_max_retries: usize,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self {
            default_rpc_url: rpc::default_url(),
            default_commitment: rpc::default_commitment(),
            fee_schedule: FeeSchedule::new(fees::wallet(), fees::bps()),
            market_api_url: market::api_url(),
            market_environment: market::environment(),
            rpc_timeout: Duration::from_secs(rpc::timeout_seconds()),
            market_timeout: Duration::from_secs(market::timeout_seconds()),
            send_max_retries: rpc::send_max_retries(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            default_rpc_url: defaults::RPC_URL.to_string(),
            default_commitment: CommitmentConfig::confirmed(),
            fee_schedule: FeeSchedule::default(),
            market_api_url: net_defaults::MARKET_API_URL.to_string(),
            market_environment: MarketEnvironment::Devnet,
            rpc_timeout: Duration::from_secs(net_defaults::RPC_TIMEOUT_SECONDS),
            market_timeout: Duration::from_secs(net_defaults::MARKET_TIMEOUT_SECONDS),
            send_max_retries: defaults::SEND_MAX_RETRIES,
        }
    }
}
