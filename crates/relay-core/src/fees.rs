//! Protocol fee calculation and the fee transfer instruction

use crate::constants::{self, BPS_DENOMINATOR};
use relay_types::TradeDirection;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use solana_system_interface::instruction as system_instruction;

/// Where the protocol fee goes and how much of the trade it takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub wallet: Pubkey,
    pub bps: u64,
}

impl FeeSchedule {
    pub fn new(wallet: Pubkey, bps: u64) -> Self {
        Self { wallet, bps }
    }

    /// Fee charged on `source_amount`, rounded down. Saturates at
    /// `u64::MAX` for rates above 100%.
    pub fn fee_on(&self, source_amount: u64) -> u64 {
        // u128 keeps `amount * bps` from overflowing for any u64 amount
        let fee = u128::from(source_amount) * u128::from(self.bps) / u128::from(BPS_DENOMINATOR);
        u64::try_from(fee).unwrap_or(u64::MAX)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(constants::fee_wallet(), constants::FEE_BPS)
    }
}

/// Protocol fee for one trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fee {
    pub amount: u64,
    /// The amount the fee was taken from
    pub source_amount: u64,
}

/// Fee on the side being spent: collateral for BUY, tokens for SELL.
pub fn compute_fee(
    schedule: &FeeSchedule,
    direction: TradeDirection,
    token_amount: u64,
    collateral_amount: u64,
) -> Fee {
    let source_amount = match direction {
        TradeDirection::Buy => collateral_amount,
        TradeDirection::Sell => token_amount,
    };
    Fee {
        amount: schedule.fee_on(source_amount),
        source_amount,
    }
}

/// Transfer of `fee_amount` lamports from the signer to the fee wallet
pub fn build_fee_instruction(schedule: &FeeSchedule, signer: &Pubkey, fee_amount: u64) -> Instruction {
    system_instruction::transfer(signer, &schedule.wallet, fee_amount)
}
