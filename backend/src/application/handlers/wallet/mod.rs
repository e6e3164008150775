//! Wallet, ledger and withdrawal handlers.

mod adjust_wallet;
mod get_wallet;
mod list_transactions;
mod list_withdrawals;
mod request_withdrawal;
mod review_withdrawal;

pub use adjust_wallet::{AdjustWalletCommand, AdjustWalletHandler};
pub use get_wallet::{GetWalletHandler, WalletView, RECENT_ENTRIES};
pub use list_transactions::{ListTransactionsHandler, ListTransactionsQuery};
pub use list_withdrawals::{ListMyWithdrawalsHandler, ListWithdrawalsHandler, ListWithdrawalsQuery};
pub use request_withdrawal::{
    RequestWithdrawalCommand, RequestWithdrawalHandler, RequestWithdrawalResult,
};
pub use review_withdrawal::{
    ApproveWithdrawalCommand, ApproveWithdrawalHandler, RejectWithdrawalCommand,
    RejectWithdrawalHandler,
};
