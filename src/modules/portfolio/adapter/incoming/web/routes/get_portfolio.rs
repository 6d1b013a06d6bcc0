use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};

/// Public read of the whole document. 503 until the first snapshot has
/// been confirmed by the store subscription.
#[get("/api/portfolio")]
pub async fn get_portfolio_handler(data: web::Data<AppState>) -> impl Responder {
    match data.portfolio_service.snapshot().await {
        Some(document) => ApiResponse::success(document),
        None => ApiResponse::service_unavailable(
            "DOCUMENT_LOADING",
            "Portfolio document is still loading",
        ),
    }
}
