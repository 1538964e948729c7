//! Transaction submission helpers over the blocking RPC client.
//!
//! Failures from the cluster propagate unchanged behind `anyhow` context;
//! no retry policy is layered on top here.

use anyhow::Context;
use solana_client::rpc_client::RpcClient;
use solana_instruction::Instruction;
use solana_sdk::{
    message::Message,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::logs::log_success;

/// Tops up `payer` to at least `minimum_balance` lamports via airdrop,
/// waiting for the airdrop to confirm before returning.
pub async fn fund_account(
    rpc: &RpcClient,
    payer: &Keypair,
    minimum_balance: u64,
) -> anyhow::Result<u64> {
    let balance = rpc
        .get_balance(&payer.pubkey())
        .context("Failed to query payer balance")?;
    if balance >= minimum_balance {
        return Ok(balance);
    }

    let airdrop_signature = rpc
        .request_airdrop(&payer.pubkey(), minimum_balance - balance)
        .context("Failed to request airdrop")?;

    let mut i = 0;
    // Wait for airdrop confirmation.
    while !rpc
        .confirm_transaction(&airdrop_signature)
        .context("Couldn't confirm airdrop transaction")?
        && i < 10
    {
        std::thread::sleep(std::time::Duration::from_millis(500));
        i += 1;
    }

    rpc.get_balance(&payer.pubkey())
        .context("Failed to re-query payer balance")
}

/// Signs `instructions` into one transaction paid by `payer` and submits
/// it, waiting for confirmation.
pub async fn send_transaction(
    rpc: &RpcClient,
    payer: &Keypair,
    signers: &[&Keypair],
    instructions: &[Instruction],
) -> anyhow::Result<Signature> {
    let blockhash = rpc
        .get_latest_blockhash()
        .context("Failed to fetch a recent blockhash")?;

    let msg = Message::new(instructions, Some(&payer.pubkey()));
    let mut tx = Transaction::new_unsigned(msg);
    tx.try_sign(
        &std::iter::once(payer)
            .chain(signers.iter().cloned())
            .collect::<Vec<_>>(),
        blockhash,
    )
    .context("Failed to sign transaction")?;

    let signature = rpc
        .send_and_confirm_transaction(&tx)
        .context("Failed transaction submission")?;
    log_success("Signature", signature);
    Ok(signature)
}
