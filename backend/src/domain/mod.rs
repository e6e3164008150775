//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, money, email, errors, paging)
//! - `user` - Accounts and profiles
//! - `tracking` - Weight log and workouts
//! - `program` - Program catalog and enrollments
//! - `payment` - Submitted payments and their review
//! - `wallet` - Wallet balance, ledger and withdrawals
//! - `referral` - Referral codes and cashback records
//! - `social` - Friend requests and friendships
//! - `admin` - Back-office read models

pub mod admin;
pub mod foundation;
pub mod payment;
pub mod program;
pub mod referral;
pub mod social;
pub mod tracking;
pub mod user;
pub mod wallet;
