pub mod greeting;
pub mod ledger;

pub use greeting::GreetingAccount;
pub use ledger::{LedgerAccount, LEDGER_ACCOUNT_SPACE};
