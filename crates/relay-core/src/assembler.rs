//! Transaction assembly and wire encoding
//!
//! Instruction order inside a prepared transaction is fixed:
//! 1. Compute budget (priority fee), so the runtime applies it
//! 2. Protocol fee transfer, so no market instruction can drain the payer first
//! 3. Market instructions, in the order the market returned them

use crate::error::{RelayError, Result};
use crate::rpc::LatestBlockhash;
use base64::{engine::general_purpose::STANDARD, Engine};
use bincode::Options;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    packet::PACKET_DATA_SIZE,
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};

/// Instructions for one trade, grouped by role
#[derive(Debug, Clone)]
pub struct InstructionBundle {
    pub priority: Instruction,
    pub fee: Instruction,
    pub market: Vec<Instruction>,
}

impl InstructionBundle {
    /// Flatten into transaction order
    pub fn into_ordered(self) -> Vec<Instruction> {
        let mut instructions = Vec::with_capacity(2 + self.market.len());
        instructions.push(self.priority);
        instructions.push(self.fee);
        instructions.extend(self.market);
        instructions
    }
}

/// An unsigned transaction ready for the client to sign
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTransaction {
    pub payer: Pubkey,
    pub instructions: Vec<Instruction>,
    pub recent_blockhash: Hash,
    pub last_valid_block_height: u64,
    pub transaction: VersionedTransaction,
}

impl PreparedTransaction {
    pub fn to_base64(&self) -> Result<String> {
        serialize_transaction(&self.transaction)
    }
}

/// Compile the bundle into a single v0 transaction paid for by `payer`.
///
/// Signature slots are filled with placeholders, one per required signer,
/// for the client to replace when signing.
pub fn assemble(
    payer: &Pubkey,
    bundle: InstructionBundle,
    blockhash: LatestBlockhash,
) -> Result<PreparedTransaction> {
    let instructions = bundle.into_ordered();

    let message = v0::Message::try_compile(payer, &instructions, &[], blockhash.blockhash)
        .map_err(|e| RelayError::internal(format!("Failed to compile message: {e}")))?;
    let message = VersionedMessage::V0(message);

    let required_signatures = usize::from(message.header().num_required_signatures);
    let transaction = VersionedTransaction {
        signatures: vec![Signature::default(); required_signatures],
        message,
    };

    let size = wire_size(&transaction)?;
    if size > PACKET_DATA_SIZE {
        return Err(RelayError::internal(format!(
            "Transaction is {size} bytes, exceeding the {PACKET_DATA_SIZE} byte packet limit"
        )));
    }

    Ok(PreparedTransaction {
        payer: *payer,
        instructions,
        recent_blockhash: blockhash.blockhash,
        last_valid_block_height: blockhash.last_valid_block_height,
        transaction,
    })
}

fn wire_size(transaction: &VersionedTransaction) -> Result<usize> {
    bincode::serialized_size(transaction)
        .map(|size| size as usize)
        .map_err(|e| RelayError::internal(format!("Failed to size transaction: {e}")))
}

/// Wire bytes of the transaction, standard base64 encoded
pub fn serialize_transaction(transaction: &VersionedTransaction) -> Result<String> {
    let bytes = bincode::serialize(transaction)
        .map_err(|e| RelayError::internal(format!("Failed to serialize transaction: {e}")))?;
    Ok(STANDARD.encode(bytes))
}

/// Exact inverse of `serialize_transaction`.
///
/// Rejects anything that is not a complete, sanitized transaction: bad
/// base64, truncated or oversize payloads, trailing bytes, or a message whose
/// header and indexes do not agree.
pub fn deserialize_transaction(encoded: &str) -> Result<VersionedTransaction> {
    let invalid = |reason: String| RelayError::invalid_argument("transaction", reason);

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| invalid(format!("Transaction is not valid base64: {e}")))?;
    if bytes.len() > PACKET_DATA_SIZE {
        return Err(invalid(format!(
            "Transaction is {} bytes, exceeding the {PACKET_DATA_SIZE} byte packet limit",
            bytes.len()
        )));
    }

    let transaction: VersionedTransaction = bincode::options()
        .with_limit(PACKET_DATA_SIZE as u64)
        .with_fixint_encoding()
        .reject_trailing_bytes()
        .deserialize(&bytes)
        .map_err(|e| invalid(format!("Transaction could not be decoded: {e}")))?;

    transaction
        .sanitize()
        .map_err(|e| invalid(format!("Transaction is malformed: {e}")))?;

    Ok(transaction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fees::{build_fee_instruction, FeeSchedule};
    use crate::priority::build_priority_instruction;
    use solana_sdk::instruction::AccountMeta;
    use solana_sdk::{compute_budget, system_program};

    fn market_ix(program: Pubkey, signer: Pubkey, tag: u8) -> Instruction {
        Instruction::new_with_bytes(
            program,
            &[tag, 1, 2, 3],
            vec![
                AccountMeta::new(signer, true),
                AccountMeta::new(Pubkey::new_unique(), false),
                AccountMeta::new_readonly(Pubkey::new_unique(), false),
            ],
        )
    }

    fn bundle(signer: Pubkey, market_program: Pubkey) -> InstructionBundle {
        InstructionBundle {
            priority: build_priority_instruction(None),
            fee: build_fee_instruction(&FeeSchedule::default(), &signer, 1_000),
            market: vec![
                market_ix(market_program, signer, 7),
                market_ix(market_program, signer, 8),
            ],
        }
    }

    fn blockhash(seed: u8) -> LatestBlockhash {
        LatestBlockhash {
            blockhash: Hash::new_from_array([seed; 32]),
            last_valid_block_height: 1_000,
        }
    }

    #[test]
    fn test_instruction_order_is_priority_fee_market() {
        let signer = Pubkey::new_unique();
        let market_program = Pubkey::new_unique();
        let prepared = assemble(&signer, bundle(signer, market_program), blockhash(1)).unwrap();

        let message = &prepared.transaction.message;
        let keys = message.static_account_keys();
        let programs: Vec<Pubkey> = message
            .instructions()
            .iter()
            .map(|ix| keys[ix.program_id_index as usize])
            .collect();

        assert_eq!(
            programs,
            vec![
                compute_budget::id(),
                system_program::id(),
                market_program,
                market_program
            ]
        );
        assert_eq!(keys[0], signer, "payer must be the first account");
        assert_eq!(prepared.transaction.signatures, vec![Signature::default()]);
    }

    #[test]
    fn test_round_trip_is_identity() {
        let signer = Pubkey::new_unique();
        let prepared =
            assemble(&signer, bundle(signer, Pubkey::new_unique()), blockhash(9)).unwrap();

        let encoded = prepared.to_base64().unwrap();
        let decoded = deserialize_transaction(&encoded).unwrap();

        assert_eq!(decoded, prepared.transaction);
        assert_eq!(serialize_transaction(&decoded).unwrap(), encoded);
    }

    #[test]
    fn test_only_blockhash_differs_between_blockhashes() {
        let signer = Pubkey::new_unique();
        let program = Pubkey::new_unique();
        let first = assemble(&signer, bundle(signer, program), blockhash(1)).unwrap();
        let second = assemble(&signer, bundle(signer, program), blockhash(2)).unwrap();

        assert_ne!(first.to_base64().unwrap(), second.to_base64().unwrap());
        assert_ne!(
            first.transaction.message.recent_blockhash(),
            second.transaction.message.recent_blockhash()
        );

        let mut rewritten = first.transaction.message.clone();
        rewritten.set_recent_blockhash(*second.transaction.message.recent_blockhash());
        assert_eq!(rewritten, second.transaction.message);
    }

    #[test]
    fn test_malformed_payloads_are_rejected() {
        assert!(deserialize_transaction("!!!").unwrap_err().is_invalid_argument());
        assert!(deserialize_transaction("").is_err());
        assert!(deserialize_transaction("AAAA").is_err());

        let signer = Pubkey::new_unique();
        let prepared =
            assemble(&signer, bundle(signer, Pubkey::new_unique()), blockhash(3)).unwrap();
        let mut bytes = bincode::serialize(&prepared.transaction).unwrap();

        let mut trailing = bytes.clone();
        trailing.push(0);
        assert!(deserialize_transaction(&STANDARD.encode(trailing)).is_err());

        bytes.truncate(bytes.len() - 5);
        assert!(deserialize_transaction(&STANDARD.encode(bytes)).is_err());
    }

    #[test]
    fn test_oversize_transaction_is_refused() {
        let signer = Pubkey::new_unique();
        let mut oversized = bundle(signer, Pubkey::new_unique());
        oversized.market = vec![Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[0u8; PACKET_DATA_SIZE],
            vec![AccountMeta::new(signer, true)],
        )];
        assert!(assemble(&signer, oversized, blockhash(4)).is_err());
    }
}
