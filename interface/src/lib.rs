//! Wire-level interface to the hello-ledger program: account record
//! schemas, the schema-driven codec, instruction payloads, and account
//! sizing. Contains no networking; the client crate layers RPC
//! orchestration on top.

pub mod codec;
pub mod error;
pub mod instructions;
pub mod schema;
pub mod size;
pub mod state;
