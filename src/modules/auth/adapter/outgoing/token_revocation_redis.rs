use crate::modules::auth::application::ports::outgoing::token_revocation::TokenRevocationStore;
use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use std::sync::Arc;

pub struct RedisTokenRevocationStore {
    client: Arc<Client>,
}

impl RedisTokenRevocationStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn from_url(redis_url: &str) -> Result<Self, String> {
        let client =
            Client::open(redis_url).map_err(|e| format!("Redis connection error: {}", e))?;

        Ok(Self::new(Arc::new(client)))
    }

    fn key_for(token_digest: &str) -> String {
        format!("revoked_token:{}", token_digest)
    }
}

#[async_trait]
impl TokenRevocationStore for RedisTokenRevocationStore {
    async fn revoke(&self, token_digest: &str, ttl_seconds: u64) -> Result<(), String> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| format!("Redis connection error: {}", e))?;

        #[cfg(not(tarpaulin_include))]
        let _: () = conn
            .set_ex(Self::key_for(token_digest), "1", ttl_seconds)
            .await
            .map_err(|e| format!("Failed to revoke token: {}", e))?;
        // Covered by integration tests when Redis is available
        Ok(())
    }

    async fn is_revoked(&self, token_digest: &str) -> Result<bool, String> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| format!("Redis connection error: {}", e))?;

        #[cfg(not(tarpaulin_include))]
        let exists: bool = conn
            .exists(Self::key_for(token_digest))
            .await
            .map_err(|e| format!("Failed to check token status: {}", e))?;

        // Covered by integration tests when Redis is available
        Ok(exists)
    }
}
