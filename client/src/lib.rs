//! Client-side orchestration for the hello-ledger program.
//!
//! Wraps the interface crate's codec and instruction payloads with RPC
//! connection management, payer funding, idempotent account provisioning,
//! and transaction submission.

pub mod context;
pub mod error;
pub mod instructions;
pub mod logs;
pub mod transactions;

pub use logs::LogColor;
