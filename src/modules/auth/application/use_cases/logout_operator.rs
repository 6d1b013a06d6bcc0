use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::modules::auth::application::ports::outgoing::{
    token_hasher::hash_token, TokenProvider, TokenRevocationStore,
};

// ====================== Logout Response =============================
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

// ====================== Logout Error =============================
#[derive(Debug, Clone)]
pub enum LogoutError {
    RevocationFailed(String),
}

impl std::fmt::Display for LogoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogoutError::RevocationFailed(msg) => write!(f, "Token revocation failed: {}", msg),
        }
    }
}

impl std::error::Error for LogoutError {}

// ============================ Logout Use Case =============================
#[async_trait]
pub trait ILogoutOperatorUseCase: Send + Sync {
    async fn execute(&self, access_token: &str) -> Result<LogoutResponse, LogoutError>;
}

pub struct LogoutOperatorUseCase {
    revocation_store: Arc<dyn TokenRevocationStore>,
    token_provider: Arc<dyn TokenProvider>,
}

impl LogoutOperatorUseCase {
    pub fn new(
        revocation_store: Arc<dyn TokenRevocationStore>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            revocation_store,
            token_provider,
        }
    }
}

#[async_trait]
impl ILogoutOperatorUseCase for LogoutOperatorUseCase {
    async fn execute(&self, access_token: &str) -> Result<LogoutResponse, LogoutError> {
        match self.token_provider.verify_token(access_token) {
            Ok(claims) => {
                // Store the digest, never the raw token. The entry only
                // needs to outlive the token itself.
                let token_digest = hash_token(access_token);

                let now = chrono::Utc::now().timestamp();
                let remaining = (claims.exp - now).max(1) as u64;

                self.revocation_store
                    .revoke(&token_digest, remaining)
                    .await
                    .map_err(LogoutError::RevocationFailed)?;

                info!("Access token revoked for {}", claims.sub);
            }
            Err(e) => {
                // Invalid or expired tokens have nothing to revoke.
                // Logout still succeeds from the caller's perspective.
                warn!("Failed to verify token during logout: {}", e);
            }
        }

        Ok(LogoutResponse {
            message: "Logged out successfully".to_string(),
        })
    }
}
