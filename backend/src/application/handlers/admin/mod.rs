//! Admin back-office handlers.
//!
//! Program, payment and wallet administration live with their own modules.

mod dashboard_stats;
mod manage_users;

pub use dashboard_stats::DashboardStatsHandler;
pub use manage_users::{
    GetUserHandler, ListUsersHandler, ListUsersQuery, UpdateUserCommand, UpdateUserHandler,
    UserDetail,
};
