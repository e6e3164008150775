//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate domain operations through ports. Each operation is
//! one handler struct holding the ports it needs.

pub mod handlers;
