use crate::modules::auth::adapter::incoming::web::extractors::auth::extract_token_from_header;
use crate::modules::auth::application::use_cases::logout_operator::LogoutError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpRequest, Responder};
use tracing::error;

/// Logout always succeeds from the client's perspective. A missing or
/// already-expired token simply has nothing to revoke.
#[post("/api/auth/logout")]
pub async fn logout_handler(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let token = match extract_token_from_header(&req) {
        Some(token) => token,
        None => {
            return ApiResponse::success(serde_json::json!({
                "message": "Logged out successfully"
            }));
        }
    };

    match data.logout_operator_use_case.execute(&token).await {
        Ok(response) => ApiResponse::success(response),
        Err(LogoutError::RevocationFailed(ref e)) => {
            error!(error = %e, "Token revocation failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::use_cases::logout_operator::{
        ILogoutOperatorUseCase, LogoutResponse,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogout {
        tokens: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ILogoutOperatorUseCase for RecordingLogout {
        async fn execute(&self, access_token: &str) -> Result<LogoutResponse, LogoutError> {
            self.tokens.lock().await.push(access_token.to_string());
            Ok(LogoutResponse {
                message: "Logged out successfully".to_string(),
            })
        }
    }

    struct FailingLogout;

    #[async_trait]
    impl ILogoutOperatorUseCase for FailingLogout {
        async fn execute(&self, _access_token: &str) -> Result<LogoutResponse, LogoutError> {
            Err(LogoutError::RevocationFailed("redis down".to_string()))
        }
    }

    #[actix_web::test]
    async fn test_logout_with_token() {
        let use_case = RecordingLogout::default();
        let tokens = use_case.tokens.clone();

        let app_state = TestAppStateBuilder::default().with_logout(use_case).build();
        let app = test::init_service(App::new().app_data(app_state).service(logout_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(("Authorization", "Bearer some.access.token"))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["message"], "Logged out successfully");

        assert_eq!(tokens.lock().await.as_slice(), ["some.access.token"]);
    }

    #[actix_web::test]
    async fn test_logout_without_token_still_succeeds() {
        let use_case = RecordingLogout::default();
        let tokens = use_case.tokens.clone();

        let app_state = TestAppStateBuilder::default().with_logout(use_case).build();
        let app = test::init_service(App::new().app_data(app_state).service(logout_handler)).await;

        let req = test::TestRequest::post().uri("/api/auth/logout").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert!(tokens.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn test_logout_revocation_failure() {
        let app_state = TestAppStateBuilder::default()
            .with_logout(FailingLogout)
            .build();
        let app = test::init_service(App::new().app_data(app_state).service(logout_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(("Authorization", "Bearer some.access.token"))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }
}
