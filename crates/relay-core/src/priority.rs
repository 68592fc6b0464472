use crate::constants::defaults::PRIORITY_FEE_MICRO_LAMPORTS;
use solana_sdk::{compute_budget::ComputeBudgetInstruction, instruction::Instruction};

/// Compute unit price instruction for the requested priority fee.
///
/// `None` falls back to the default price; any explicit value, zero included,
/// is used as given.
pub fn build_priority_instruction(micro_lamports: Option<u64>) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_price(
        micro_lamports.unwrap_or(PRIORITY_FEE_MICRO_LAMPORTS),
    )
}
