use actix_web::{get, web, HttpResponse, Responder};
use futures::stream;

use crate::modules::portfolio::domain::document::PortfolioDocument;
use crate::AppState;

fn snapshot_frame(document: &PortfolioDocument) -> Option<String> {
    let json = serde_json::to_string(document).ok()?;
    Some(format!("event: snapshot\ndata: {}\n\n", json))
}

/// Server-sent events feed of document snapshots. Every connected client
/// gets the current snapshot on connect, then one full snapshot per
/// accepted mutation or remote change. The stream ends when the service
/// shuts down; clients are expected to reconnect.
#[get("/api/portfolio/events")]
pub async fn stream_portfolio_handler(data: web::Data<AppState>) -> impl Responder {
    let rx = data.portfolio_service.watch();

    let stream = stream::unfold((rx, true), |(mut rx, first)| async move {
        if first {
            let current = rx.borrow_and_update().clone();
            if let Some(frame) = current.as_ref().and_then(snapshot_frame) {
                return Some((
                    Ok::<_, actix_web::Error>(web::Bytes::from(frame)),
                    (rx, false),
                ));
            }
        }
        loop {
            if rx.changed().await.is_err() {
                return None;
            }
            let current = rx.borrow_and_update().clone();
            if let Some(frame) = current.as_ref().and_then(snapshot_frame) {
                return Some((Ok(web::Bytes::from(frame)), (rx, false)));
            }
        }
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_frame_shape() {
        let document = PortfolioDocument::default();
        let frame = snapshot_frame(&document).unwrap();

        assert!(frame.starts_with("event: snapshot\ndata: "));
        assert!(frame.ends_with("\n\n"));
        // Payload stays on a single line so the SSE framing holds.
        assert_eq!(frame.matches('\n').count(), 3);
    }

    #[test]
    fn test_snapshot_frame_payload_round_trips() {
        let mut document = PortfolioDocument::default();
        document.hero.name = "Grace".to_string();

        let frame = snapshot_frame(&document).unwrap();
        let payload = frame
            .strip_prefix("event: snapshot\ndata: ")
            .and_then(|rest| rest.strip_suffix("\n\n"))
            .unwrap();

        let parsed: PortfolioDocument = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed, document);
    }
}
