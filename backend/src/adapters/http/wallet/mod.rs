//! Wallet, ledger and withdrawal endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AdjustWalletRequest, LedgerEntryResponse, RequestWithdrawalRequest, WalletResponse,
    WithdrawalRequestResponse, WithdrawalResponse,
};
pub use routes::{admin_wallet_routes, wallet_routes};
