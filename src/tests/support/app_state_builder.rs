use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use tokio::sync::watch;

use crate::modules::auth::application::use_cases::check_session::{
    ICheckSessionUseCase, SessionStatus,
};
use crate::modules::auth::application::use_cases::login_operator::{
    ILoginOperatorUseCase, LoginError, LoginRequest, LoginResponse,
};
use crate::modules::auth::application::use_cases::logout_operator::{
    ILogoutOperatorUseCase, LogoutError, LogoutResponse,
};
use crate::modules::portfolio::application::service::{IPortfolioService, PortfolioError};
use crate::modules::portfolio::domain::document::{PortfolioDocument, Project, Resume};
use crate::modules::portfolio::domain::patch::{
    NewProject, NewResume, ProjectPatch, ResumePatch, SectionPatch,
};
use crate::AppState;

/// Portfolio stub that behaves like a service stuck in loading.
struct StubPortfolioService {
    updates: watch::Sender<Option<PortfolioDocument>>,
}

impl StubPortfolioService {
    fn new() -> Self {
        let (updates, _) = watch::channel(None);
        Self { updates }
    }
}

#[async_trait]
impl IPortfolioService for StubPortfolioService {
    async fn snapshot(&self) -> Option<PortfolioDocument> {
        None
    }

    fn watch(&self) -> watch::Receiver<Option<PortfolioDocument>> {
        self.updates.subscribe()
    }

    async fn update_section(
        &self,
        _patch: SectionPatch,
    ) -> Result<PortfolioDocument, PortfolioError> {
        Err(PortfolioError::NotReady)
    }

    async fn add_project(&self, _draft: NewProject) -> Result<Project, PortfolioError> {
        Err(PortfolioError::NotReady)
    }

    async fn update_project(
        &self,
        _id: i64,
        _patch: ProjectPatch,
    ) -> Result<PortfolioDocument, PortfolioError> {
        Err(PortfolioError::NotReady)
    }

    async fn delete_project(&self, _id: i64) -> Result<PortfolioDocument, PortfolioError> {
        Err(PortfolioError::NotReady)
    }

    async fn add_resume(&self, _draft: NewResume) -> Result<Resume, PortfolioError> {
        Err(PortfolioError::NotReady)
    }

    async fn update_resume(
        &self,
        _id: i64,
        _patch: ResumePatch,
    ) -> Result<PortfolioDocument, PortfolioError> {
        Err(PortfolioError::NotReady)
    }

    async fn delete_resume(&self, _id: i64) -> Result<PortfolioDocument, PortfolioError> {
        Err(PortfolioError::NotReady)
    }
}

struct StubLoginUseCase;

#[async_trait]
impl ILoginOperatorUseCase for StubLoginUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginResponse, LoginError> {
        Err(LoginError::InvalidCredentials)
    }
}

struct StubLogoutUseCase;

#[async_trait]
impl ILogoutOperatorUseCase for StubLogoutUseCase {
    async fn execute(&self, _access_token: &str) -> Result<LogoutResponse, LogoutError> {
        Ok(LogoutResponse {
            message: "Logged out successfully".to_string(),
        })
    }
}

struct StubCheckSessionUseCase;

#[async_trait]
impl ICheckSessionUseCase for StubCheckSessionUseCase {
    async fn execute(&self, _access_token: Option<&str>) -> SessionStatus {
        SessionStatus::anonymous()
    }
}

pub struct TestAppStateBuilder {
    portfolio_service: Arc<dyn IPortfolioService>,
    login_operator_use_case: Arc<dyn ILoginOperatorUseCase>,
    logout_operator_use_case: Arc<dyn ILogoutOperatorUseCase>,
    check_session_use_case: Arc<dyn ICheckSessionUseCase>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            portfolio_service: Arc::new(StubPortfolioService::new()),
            login_operator_use_case: Arc::new(StubLoginUseCase),
            logout_operator_use_case: Arc::new(StubLogoutUseCase),
            check_session_use_case: Arc::new(StubCheckSessionUseCase),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_portfolio(mut self, service: Arc<dyn IPortfolioService>) -> Self {
        self.portfolio_service = service;
        self
    }

    pub fn with_login(mut self, uc: impl ILoginOperatorUseCase + 'static) -> Self {
        self.login_operator_use_case = Arc::new(uc);
        self
    }

    pub fn with_logout(mut self, uc: impl ILogoutOperatorUseCase + 'static) -> Self {
        self.logout_operator_use_case = Arc::new(uc);
        self
    }

    pub fn with_check_session(mut self, uc: impl ICheckSessionUseCase + 'static) -> Self {
        self.check_session_use_case = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            portfolio_service: self.portfolio_service,
            login_operator_use_case: self.login_operator_use_case,
            logout_operator_use_case: self.logout_operator_use_case,
            check_session_use_case: self.check_session_use_case,
        })
    }
}
