pub mod jwt;
pub mod security;
pub mod token_revocation_redis;
