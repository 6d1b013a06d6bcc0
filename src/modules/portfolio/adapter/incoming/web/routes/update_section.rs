use actix_web::{patch, web, Responder};
use tracing::info;

use crate::modules::auth::adapter::incoming::web::extractors::auth::Operator;
use crate::modules::portfolio::application::service::PortfolioError;
use crate::modules::portfolio::domain::patch::{SectionPatch, SectionPatchError};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Shallow merge into one singleton section. Keys absent from the body
/// are left untouched; sub-objects in the body replace the stored ones.
#[patch("/api/portfolio/sections/{section}")]
pub async fn update_section_handler(
    operator: Operator,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    let section = path.into_inner();

    let patch = match SectionPatch::from_section_value(&section, body.into_inner()) {
        Ok(patch) => patch,
        Err(SectionPatchError::UnknownSection(name)) => {
            return ApiResponse::bad_request(
                "UNKNOWN_SECTION",
                &format!("Unknown section: {}", name),
            );
        }
        Err(SectionPatchError::InvalidPayload(msg)) => {
            return ApiResponse::bad_request("VALIDATION_ERROR", &msg);
        }
    };

    info!(section = %section, operator = %operator.email, "Section update");

    match data.portfolio_service.update_section(patch).await {
        Ok(document) => ApiResponse::success(document),
        Err(PortfolioError::NotReady) => ApiResponse::service_unavailable(
            "DOCUMENT_LOADING",
            "Portfolio document is still loading",
        ),
    }
}
