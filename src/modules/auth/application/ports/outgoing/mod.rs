pub mod password_hasher;
pub mod token_hasher;
pub mod token_provider;
pub mod token_revocation;

pub use password_hasher::{HashError, PasswordHasher};
pub use token_provider::{TokenClaims, TokenError, TokenProvider};
pub use token_revocation::TokenRevocationStore;
