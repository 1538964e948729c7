//! End-to-end demo against a local validator: greet, provision a vault,
//! deposit, then read the on-chain state back.
//!
//! Expects the program deployed and its keypair at
//! `dist/program/helloworld-keypair.json`, or set `PROGRAM_KEYPAIR` and
//! `RPC_URL`.

use std::path::PathBuf;

use client::{
    context::LedgerContext,
    logs::{log_divider, log_info, log_success, log_warning},
};
use solana_sdk::signature::Signer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let rpc_url =
        std::env::var("RPC_URL").unwrap_or_else(|_| "http://127.0.0.1:8899".to_string());
    let program_keypair = PathBuf::from(
        std::env::var("PROGRAM_KEYPAIR")
            .unwrap_or_else(|_| "dist/program/helloworld-keypair.json".to_string()),
    );

    let mut ctx = LedgerContext::establish(rpc_url, &program_keypair, None).await?;
    log_divider();

    // The greeting account must exist before anything references it.
    ctx.ensure_greeting_account().await?;

    // Legacy greeting transfer, split across two receivers.
    let receiver = ctx.greeting_account;
    ctx.send_greet([&receiver, &receiver], 300_000_000).await?;

    // Fresh vault for this run, then credit the payer's identity in it.
    let vault = ctx.create_vault_account().await?;
    ctx.send_deposit().await?;

    log_divider();
    match ctx.read_ledger(&vault).await? {
        Some(ledger) => {
            let payer = ctx.payer.pubkey().to_string();
            match ledger.balance_of(&payer) {
                Some(balance) => log_success(
                    "Vault balance",
                    format!("{payer} holds {balance} lamports"),
                ),
                None => log_warning("Vault balance", format!("no entry for {payer}")),
            }
            log_info("Ledger entries", ledger.tree_length);
        }
        None => log_warning("Vault", "account not found"),
    }

    match ctx.read_greeting().await? {
        Some(greeting) => log_success(
            "Greetings",
            format!("{} greeted {} time(s)", ctx.greeting_account, greeting.counter),
        ),
        None => log_warning("Greetings", "greeting account not found"),
    }

    Ok(())
}
