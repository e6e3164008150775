//! Authentication adapters.
//!
//! - `password` - Argon2id `PasswordHasher`
//! - `jwt` - HS256 `TokenIssuer` and token decoding
//! - `session` - `SessionValidator` that re-checks the stored account
//! - `mock` - Token map for tests

mod jwt;
mod mock;
mod password;
mod session;

pub use jwt::{Claims, JwtTokenService};
pub use mock::MockSessionValidator;
pub use password::Argon2PasswordHasher;
pub use session::AccountSessionValidator;
