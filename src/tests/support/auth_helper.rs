use std::sync::Arc;

use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::application::ports::outgoing::TokenProvider;

pub fn create_test_jwt_service() -> JwtTokenService {
    let jwt_config = JwtConfig {
        issuer: "portfolio".to_string(),
        secret_key: "test_secret_key_for_testing_only_32ch".to_string(),
        access_token_expiry: 1800,
    };
    JwtTokenService::new(jwt_config)
}

/// App data the `Operator` extractor resolves the token provider from.
pub fn test_token_provider_data() -> actix_web::web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(create_test_jwt_service());
    actix_web::web::Data::new(provider)
}

/// A bearer token the test token provider accepts.
pub fn test_operator_token() -> String {
    create_test_jwt_service()
        .generate_access_token("operator@example.com")
        .expect("test token generation failed")
}
