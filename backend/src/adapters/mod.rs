//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Argon2 password hashing, JWT issuing and session validation
//! - `http` - axum REST API
//! - `memory` - in-memory store for tests and database-less runs
//! - `postgres` - sqlx repositories over PostgreSQL

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
