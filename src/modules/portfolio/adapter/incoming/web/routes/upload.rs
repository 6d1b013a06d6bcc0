use actix_web::{post, web, HttpRequest, Responder};
use serde::Serialize;
use tracing::info;

use crate::modules::auth::adapter::incoming::web::extractors::auth::Operator;
use crate::modules::portfolio::domain::upload::{inline_data_uri, UploadError};
use crate::shared::api::ApiResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub data_uri: String,
}

/// Accepts a raw file body and hands back a `data:` URI the client embeds
/// into the document itself (cover photos, attached files). Nothing is
/// written server-side; persistence happens when the document field that
/// carries the URI is saved.
#[post("/api/uploads")]
pub async fn upload_handler(
    operator: Operator,
    req: HttpRequest,
    body: web::Bytes,
) -> impl Responder {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    info!(
        operator = %operator.email,
        content_type = %content_type,
        size = body.len(),
        "Inlining uploaded file"
    );

    match inline_data_uri(&content_type, &body) {
        Ok(data_uri) => ApiResponse::success(UploadResponse { data_uri }),
        Err(err @ UploadError::TooLarge { .. }) => {
            ApiResponse::bad_request("FILE_TOO_LARGE", &err.to_string())
        }
    }
}
