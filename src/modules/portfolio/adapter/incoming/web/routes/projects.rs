use actix_web::{delete, patch, post, web, Responder};
use tracing::info;

use crate::modules::auth::adapter::incoming::web::extractors::auth::Operator;
use crate::modules::portfolio::application::service::PortfolioError;
use crate::modules::portfolio::domain::patch::{NewProject, ProjectPatch};
use crate::shared::api::ApiResponse;
use crate::AppState;

fn loading_response() -> actix_web::HttpResponse {
    ApiResponse::service_unavailable("DOCUMENT_LOADING", "Portfolio document is still loading")
}

#[post("/api/portfolio/projects")]
pub async fn create_project_handler(
    operator: Operator,
    body: web::Json<NewProject>,
    data: web::Data<AppState>,
) -> impl Responder {
    let draft = body.into_inner();
    info!(title = %draft.title, operator = %operator.email, "Creating project");

    match data.portfolio_service.add_project(draft).await {
        Ok(project) => ApiResponse::created(project),
        Err(PortfolioError::NotReady) => loading_response(),
    }
}

/// Patching an id that no longer exists is a silent no-op: the current
/// document comes back unchanged, never a 404.
#[patch("/api/portfolio/projects/{id}")]
pub async fn update_project_handler(
    _operator: Operator,
    path: web::Path<i64>,
    body: web::Json<ProjectPatch>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data
        .portfolio_service
        .update_project(id, body.into_inner())
        .await
    {
        Ok(document) => ApiResponse::success(document),
        Err(PortfolioError::NotReady) => loading_response(),
    }
}

#[delete("/api/portfolio/projects/{id}")]
pub async fn delete_project_handler(
    operator: Operator,
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    info!(id, operator = %operator.email, "Deleting project");

    match data.portfolio_service.delete_project(id).await {
        Ok(document) => ApiResponse::success(document),
        Err(PortfolioError::NotReady) => loading_response(),
    }
}
