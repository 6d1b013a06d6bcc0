use crate::modules::auth::adapter::incoming::web::extractors::auth::extract_token_from_header;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, HttpRequest, Responder};

#[get("/api/auth/session")]
pub async fn session_handler(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let token = extract_token_from_header(&req);

    let status = data
        .check_session_use_case
        .execute(token.as_deref())
        .await;

    ApiResponse::success(status)
}
