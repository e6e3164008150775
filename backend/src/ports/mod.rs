//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `AccountRepository` - Accounts, with atomic signup side effects
//! - `ProfileRepository` - Member profiles
//! - `WeightRepository`, `WorkoutRepository` - Tracking data
//! - `ProgramRepository`, `EnrollmentReader` - Catalog and access
//! - `PaymentRepository` - Payments, with atomic approval side effects
//! - `WalletRepository` - Balances, ledger and withdrawals
//! - `ReferralRepository` - Referral records
//! - `FriendshipRepository` - Social graph
//! - `AdminReader` - Dashboard aggregates
//!
//! ## Auth Ports
//!
//! - `PasswordHasher` - One-way password hashing
//! - `TokenIssuer` - Access token creation
//! - `SessionValidator` - Access token validation

mod account_repository;
mod admin_reader;
mod credentials;
mod friendship_repository;
mod payment_repository;
mod profile_repository;
mod program_repository;
mod referral_repository;
mod session_validator;
mod tracking_repository;
mod wallet_repository;

pub use account_repository::{AccountRepository, NewAccount, ReferralGrant};
pub use admin_reader::AdminReader;
pub use credentials::{IssuedToken, PasswordHasher, TokenIssuer};
pub use friendship_repository::FriendshipRepository;
pub use payment_repository::{CashbackSettlement, PaymentApproval, PaymentRepository};
pub use profile_repository::ProfileRepository;
pub use program_repository::{EnrollmentReader, ProgramRepository};
pub use referral_repository::ReferralRepository;
pub use session_validator::SessionValidator;
pub use tracking_repository::{WeightRepository, WorkoutRepository};
pub use wallet_repository::WalletRepository;
