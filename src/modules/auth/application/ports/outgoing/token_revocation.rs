use async_trait::async_trait;

/// Storage for revoked access tokens, keyed by token digest. Entries
/// expire together with the token they revoke, so the store stays small.
#[async_trait]
pub trait TokenRevocationStore: Send + Sync {
    async fn revoke(&self, token_digest: &str, ttl_seconds: u64) -> Result<(), String>;
    async fn is_revoked(&self, token_digest: &str) -> Result<bool, String>;
}
