//! FitPass - Fitness Subscription Backend
//!
//! Members track weight and workouts, buy training programs by submitting
//! manual payments for admin approval, and earn wallet credit by referring
//! friends. Admins review payments and withdrawals and manage accounts.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
