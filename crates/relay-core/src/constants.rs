//! Protocol constants and request defaults

use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Wallet that collects the protocol fee on every trade
pub const FEE_WALLET: &str = "8r6RYxwenmMkuXEVXMkczPfkasWzT1JGt9SbHkUHzzvk";

/// Protocol fee rate in basis points (1%)
pub const FEE_BPS: u64 = 100;

/// Basis points in one whole
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Get the fee wallet as Pubkey
pub fn fee_wallet() -> Pubkey {
    Pubkey::from_str(FEE_WALLET).expect("Invalid fee wallet address")
}

/// Defaults applied when a request omits an optional field
pub mod defaults {
    /// Public devnet RPC endpoint
    pub const RPC_URL: &str = "https://api.devnet.solana.com";

    pub const COMMITMENT: &str = "confirmed";

    /// Slippage tolerance in basis points (5%)
    pub const SLIPPAGE_BPS: u64 = 500;

    /// Compute unit price in micro-lamports
    pub const PRIORITY_FEE_MICRO_LAMPORTS: u64 = 200_000;

    /// Retries the RPC node performs when forwarding a transaction to the leader
    pub const SEND_MAX_RETRIES: usize = 3;
}

/// Network and service defaults
pub mod network {
    pub const HOST: &str = "0.0.0.0";

    pub const PORT: u16 = 3000;

    /// Local market pricing service
    pub const MARKET_API_URL: &str = "http://127.0.0.1:8787";

    pub const RPC_TIMEOUT_SECONDS: u64 = 30;

    pub const MARKET_TIMEOUT_SECONDS: u64 = 30;
}

/// Logging defaults
pub mod logging {
    pub const LOG_FILE: &str = "logs/app.log";

    pub const RUST_LOG: &str = "relay_api=debug,relay_core=debug,tower_http=info";
}
