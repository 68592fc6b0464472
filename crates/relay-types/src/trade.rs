//! Trade enums with type-safe string forms
//!
//! The wire spelling of every variant is fixed by the HTTP contract, so the
//! strum and serde representations are kept identical.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Direction of a bonding-curve trade
#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    EnumString,
    IntoStaticStr,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum TradeDirection {
    /// Spend collateral to receive tokens
    #[strum(serialize = "BUY")]
    #[serde(rename = "BUY")]
    Buy,

    /// Liquidate tokens to receive collateral
    #[strum(serialize = "SELL")]
    #[serde(rename = "SELL")]
    Sell,
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Which side of the trade stays fixed while the other absorbs slippage
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Display,
    EnumString,
    IntoStaticStr,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum FixedSide {
    /// The input amount is exact
    #[default]
    #[strum(serialize = "IN")]
    #[serde(rename = "IN")]
    In,

    /// The output amount is exact
    #[strum(serialize = "OUT")]
    #[serde(rename = "OUT")]
    Out,
}

impl FixedSide {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Market deployment the pricing service should resolve curves against
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Display,
    EnumString,
    IntoStaticStr,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MarketEnvironment {
    #[default]
    #[strum(serialize = "devnet")]
    Devnet,

    #[strum(serialize = "mainnet")]
    Mainnet,
}
