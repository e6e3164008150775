//! Wallet, ledger and withdrawals.

mod ledger;
mod withdrawal;

pub use ledger::{insufficient_funds, Direction, LedgerCategory, LedgerEntry, Posting, Wallet};
pub use withdrawal::Withdrawal;
