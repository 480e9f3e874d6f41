//! Authentication adapters.
//!
//! - `jwt` - HS256 platform access tokens (`SessionValidator`)
//! - `mock` - Test validator that maps fixed tokens to users
//! - `password` - Argon2id `PasswordHasher`

mod jwt;
mod mock;
mod password;

pub use jwt::{AccessClaims, JwtSessionValidator};
pub use mock::{MockSessionValidator, MOCK_ADMIN_ROLE};
pub use password::Argon2PasswordHasher;
