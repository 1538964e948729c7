//! Builders for the full on-chain instructions: program id, account
//! metas in the order the deployed program walks them, and the packed
//! payload from the interface crate.

use hello_ledger_interface::instructions::LedgerInstruction;
use solana_instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_system_interface::program as system_program;

/// Deposit into the vault: the depositor signs and funds, the vault
/// account's balance map is credited.
pub fn deposit(program_id: &Pubkey, depositor: &Pubkey, vault: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*depositor, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: LedgerInstruction::Deposit.pack(),
    }
}

/// Withdraw from the vault back to the withdrawer.
pub fn withdraw(program_id: &Pubkey, vault: &Pubkey, withdrawer: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*vault, false),
            AccountMeta::new(*withdrawer, true),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: LedgerInstruction::Withdraw.pack(),
    }
}

/// Legacy greeting transfer splitting `lamports` across two receivers.
///
/// Uses the bare-amount wire convention with no discriminant byte; see
/// [`LedgerInstruction::Greet`].
pub fn greet(
    program_id: &Pubkey,
    payer: &Pubkey,
    receivers: [&Pubkey; 2],
    lamports: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*receivers[0], false),
            AccountMeta::new(*receivers[1], false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: LedgerInstruction::Greet { lamports }.pack(),
    }
}
