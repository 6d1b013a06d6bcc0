use crate::modules::auth::application::use_cases::login_operator::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};

/// Login request from client
#[derive(Deserialize)]
pub struct LoginRequestDto {
    pub email: String,
    pub password: String,
}

#[post("/api/auth/login")]
pub async fn login_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let use_case = &data.login_operator_use_case;
    let dto = req.into_inner();

    info!(email = %dto.email, "Login attempt");

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(req) => req,
        Err(e) => {
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    match use_case.execute(request).await {
        Ok(response) => {
            info!(email = %response.email, "Operator logged in");
            ApiResponse::success(response)
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: Invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(LoginError::PasswordVerificationFailed(ref e)) => {
            error!(error = %e, "Password verification failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::use_cases::login_operator::{
        ILoginOperatorUseCase, LoginResponse,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct MockLoginSuccess;

    #[async_trait]
    impl ILoginOperatorUseCase for MockLoginSuccess {
        async fn execute(&self, _request: LoginRequest) -> Result<LoginResponse, LoginError> {
            Ok(LoginResponse {
                access_token: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.access".to_string(),
                email: "operator@example.com".to_string(),
                expires_in: 1800,
            })
        }
    }

    struct MockLoginInvalidCredentials;

    #[async_trait]
    impl ILoginOperatorUseCase for MockLoginInvalidCredentials {
        async fn execute(&self, _request: LoginRequest) -> Result<LoginResponse, LoginError> {
            Err(LoginError::InvalidCredentials)
        }
    }

    struct MockLoginTokenFailure;

    #[async_trait]
    impl ILoginOperatorUseCase for MockLoginTokenFailure {
        async fn execute(&self, _request: LoginRequest) -> Result<LoginResponse, LoginError> {
            Err(LoginError::TokenGenerationFailed("signing failed".to_string()))
        }
    }

    fn login_json() -> serde_json::Value {
        serde_json::json!({
            "email": "operator@example.com",
            "password": "SecurePass123!"
        })
    }

    #[actix_web::test]
    async fn test_login_success() {
        let app_state = TestAppStateBuilder::default()
            .with_login(MockLoginSuccess)
            .build();

        let app = test::init_service(App::new().app_data(app_state).service(login_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(login_json())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert!(body["data"]["accessToken"].is_string());
        assert_eq!(body["data"]["email"], "operator@example.com");
        assert_eq!(body["data"]["expiresIn"], 1800);
        assert!(body.get("error").is_none());
    }

    #[actix_web::test]
    async fn test_login_invalid_credentials() {
        let app_state = TestAppStateBuilder::default()
            .with_login(MockLoginInvalidCredentials)
            .build();

        let app = test::init_service(App::new().app_data(app_state).service(login_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(login_json())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
        assert_eq!(body["error"]["message"], "Invalid email or password");
        assert!(body.get("data").is_none());
    }

    #[actix_web::test]
    async fn test_login_token_generation_failure() {
        let app_state = TestAppStateBuilder::default()
            .with_login(MockLoginTokenFailure)
            .build();

        let app = test::init_service(App::new().app_data(app_state).service(login_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(login_json())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }

    #[actix_web::test]
    async fn test_login_with_invalid_email_format() {
        let app_state = TestAppStateBuilder::default()
            .with_login(MockLoginSuccess)
            .build();

        let app = test::init_service(App::new().app_data(app_state).service(login_handler)).await;

        for email in ["notanemail", "missing@", "@nodomain.com", ""] {
            let req = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(serde_json::json!({
                    "email": email,
                    "password": "password123"
                }))
                .to_request();

            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400, "Should reject invalid email: {}", email);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[actix_web::test]
    async fn test_login_with_empty_password() {
        let app_state = TestAppStateBuilder::default()
            .with_login(MockLoginSuccess)
            .build();

        let app = test::init_service(App::new().app_data(app_state).service(login_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "email": "operator@example.com",
                "password": ""
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
