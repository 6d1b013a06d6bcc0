use actix_web::{delete, patch, post, web, Responder};
use tracing::info;

use crate::modules::auth::adapter::incoming::web::extractors::auth::Operator;
use crate::modules::portfolio::application::service::PortfolioError;
use crate::modules::portfolio::domain::patch::{NewResume, ResumePatch};
use crate::shared::api::ApiResponse;
use crate::AppState;

fn loading_response() -> actix_web::HttpResponse {
    ApiResponse::service_unavailable("DOCUMENT_LOADING", "Portfolio document is still loading")
}

#[post("/api/portfolio/resumes")]
pub async fn create_resume_handler(
    operator: Operator,
    body: web::Json<NewResume>,
    data: web::Data<AppState>,
) -> impl Responder {
    let draft = body.into_inner();
    info!(title = %draft.title, operator = %operator.email, "Creating resume");

    match data.portfolio_service.add_resume(draft).await {
        Ok(resume) => ApiResponse::created(resume),
        Err(PortfolioError::NotReady) => loading_response(),
    }
}

#[patch("/api/portfolio/resumes/{id}")]
pub async fn update_resume_handler(
    _operator: Operator,
    path: web::Path<i64>,
    body: web::Json<ResumePatch>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data
        .portfolio_service
        .update_resume(id, body.into_inner())
        .await
    {
        Ok(document) => ApiResponse::success(document),
        Err(PortfolioError::NotReady) => loading_response(),
    }
}

#[delete("/api/portfolio/resumes/{id}")]
pub async fn delete_resume_handler(
    operator: Operator,
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    info!(id, operator = %operator.email, "Deleting resume");

    match data.portfolio_service.delete_resume(id).await {
        Ok(document) => ApiResponse::success(document),
        Err(PortfolioError::NotReady) => loading_response(),
    }
}
