use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::modules::auth::application::ports::outgoing::{
    token_hasher::hash_token, TokenProvider, TokenRevocationStore,
};

/// Session state as seen by the client. A missing or broken token maps to
/// `authenticated: false` rather than an error so the frontend can branch
/// on a single flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionStatus {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            email: None,
        }
    }

    pub fn authenticated(email: String) -> Self {
        Self {
            authenticated: true,
            email: Some(email),
        }
    }
}

#[async_trait]
pub trait ICheckSessionUseCase: Send + Sync {
    async fn execute(&self, access_token: Option<&str>) -> SessionStatus;
}

pub struct CheckSessionUseCase {
    token_provider: Arc<dyn TokenProvider>,
    revocation_store: Arc<dyn TokenRevocationStore>,
}

impl CheckSessionUseCase {
    pub fn new(
        token_provider: Arc<dyn TokenProvider>,
        revocation_store: Arc<dyn TokenRevocationStore>,
    ) -> Self {
        Self {
            token_provider,
            revocation_store,
        }
    }
}

#[async_trait]
impl ICheckSessionUseCase for CheckSessionUseCase {
    async fn execute(&self, access_token: Option<&str>) -> SessionStatus {
        let token = match access_token {
            Some(token) if !token.is_empty() => token,
            _ => return SessionStatus::anonymous(),
        };

        let claims = match self.token_provider.verify_token(token) {
            Ok(claims) => claims,
            Err(_) => return SessionStatus::anonymous(),
        };

        match self.revocation_store.is_revoked(&hash_token(token)).await {
            Ok(true) => SessionStatus::anonymous(),
            Ok(false) => SessionStatus::authenticated(claims.sub),
            Err(e) => {
                // Fail closed: an unreachable revocation store must not
                // resurrect a logged-out session.
                warn!("Revocation check failed: {}", e);
                SessionStatus::anonymous()
            }
        }
    }
}
