use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Statement};
use sqlx::postgres::PgListener;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::portfolio::application::ports::outgoing::{
    DocumentStore, DocumentStoreError, DocumentSubscription,
};
use crate::portfolio::domain::document::PortfolioDocument;

use super::sea_orm_entity::{
    ActiveModel as DocumentActiveModel, Column as DocumentColumn, Entity as DocumentEntity,
    Model as DocumentModel,
};

/// Fixed well-known key of the single portfolio row.
pub const DOCUMENT_KEY: &str = "portfolio";

/// Postgres channel notified after every write; the listener re-reads the
/// row and fans the snapshot out, so every service instance pointed at the
/// same database observes every write, its own included.
const CHANGE_CHANNEL: &str = "portfolio_document_changed";

pub struct DocumentStorePostgres {
    db: Arc<DatabaseConnection>,
    database_url: String,
    changes: broadcast::Sender<PortfolioDocument>,
    listener_started: AtomicBool,
}

impl DocumentStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>, database_url: String) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            db,
            database_url,
            changes,
            listener_started: AtomicBool::new(false),
        }
    }

    async fn read_row(
        db: &DatabaseConnection,
    ) -> Result<Option<DocumentModel>, DocumentStoreError> {
        DocumentEntity::find_by_id(DOCUMENT_KEY)
            .one(db)
            .await
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))
    }

    async fn read_document(
        db: &DatabaseConnection,
    ) -> Result<Option<PortfolioDocument>, DocumentStoreError> {
        match Self::read_row(db).await? {
            Some(model) => Ok(Some(model.to_domain()?)),
            None => Ok(None),
        }
    }

    /// Starts the shared LISTEN task once, on the first subscription. The
    /// task reconnects with a short backoff if the connection drops.
    fn ensure_listener(&self) {
        if self
            .listener_started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let db = Arc::clone(&self.db);
        let database_url = self.database_url.clone();
        let changes = self.changes.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = listen_for_changes(&db, &database_url, &changes).await {
                    error!("Portfolio change listener failed: {}", e);
                }
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        });
    }
}

async fn listen_for_changes(
    db: &DatabaseConnection,
    database_url: &str,
    changes: &broadcast::Sender<PortfolioDocument>,
) -> Result<(), DocumentStoreError> {
    let mut listener = PgListener::connect(database_url)
        .await
        .map_err(|e| DocumentStoreError::SubscriptionError(e.to_string()))?;
    listener
        .listen(CHANGE_CHANNEL)
        .await
        .map_err(|e| DocumentStoreError::SubscriptionError(e.to_string()))?;
    info!("Listening for portfolio document changes");

    loop {
        listener
            .recv()
            .await
            .map_err(|e| DocumentStoreError::SubscriptionError(e.to_string()))?;

        // The notification payload is not trusted; the row is the source
        // of truth.
        match DocumentStorePostgres::read_document(db).await {
            Ok(Some(document)) => {
                let _ = changes.send(document);
            }
            Ok(None) => warn!("Change notification for a missing portfolio document"),
            Err(e) => error!("Failed to re-read portfolio document after change: {}", e),
        }
    }
}

#[async_trait]
impl DocumentStore for DocumentStorePostgres {
    async fn read(&self) -> Result<Option<PortfolioDocument>, DocumentStoreError> {
        Self::read_document(&self.db).await
    }

    async fn write(&self, document: &PortfolioDocument) -> Result<(), DocumentStoreError> {
        let model = DocumentModel::from_domain(DOCUMENT_KEY, document);
        let active_model: DocumentActiveModel = model.into();

        DocumentEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(DocumentColumn::Key)
                    .update_columns([DocumentColumn::Data, DocumentColumn::UpdatedAt])
                    .to_owned(),
            )
            .exec(&*self.db)
            .await
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        // Wake every listener, local and remote.
        self.db
            .execute(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                "SELECT pg_notify($1, $2)",
                [CHANGE_CHANNEL.into(), DOCUMENT_KEY.into()],
            ))
            .await
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn subscribe(&self) -> Result<DocumentSubscription, DocumentStoreError> {
        self.ensure_listener();
        let initial = self.read().await?;
        Ok(DocumentSubscription {
            initial,
            changes: self.changes.subscribe(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn stored_model(document: &PortfolioDocument) -> DocumentModel {
        DocumentModel::from_domain(DOCUMENT_KEY, document)
    }

    #[test]
    fn test_model_round_trip() {
        let mut document = PortfolioDocument::default();
        document.hero.name = "Ada".to_string();

        let model = stored_model(&document);
        assert_eq!(model.key, DOCUMENT_KEY);
        assert_eq!(model.to_domain().unwrap(), document);
    }

    #[test]
    fn test_malformed_row_is_reported_not_panicked() {
        let model = DocumentModel {
            key: DOCUMENT_KEY.to_string(),
            data: serde_json::json!({ "hero": "not an object" }),
            updated_at: chrono::Utc::now().into(),
        };

        let result = model.to_domain();
        assert!(matches!(
            result,
            Err(DocumentStoreError::MalformedDocument(_))
        ));
    }

    #[tokio::test]
    async fn test_read_missing_document_is_first_run() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results::<DocumentModel, _, _>([Vec::new()])
            .into_connection();
        let store = DocumentStorePostgres::new(Arc::new(db), "postgres://unused".to_string());

        let result = store.read().await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_read_existing_document() {
        let mut document = PortfolioDocument::default();
        document.settings.show_resume = false;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_model(&document)]])
            .into_connection();
        let store = DocumentStorePostgres::new(Arc::new(db), "postgres://unused".to_string());

        let result = store.read().await.unwrap();
        assert_eq!(result, Some(document));
    }

    #[tokio::test]
    async fn test_write_upserts_and_notifies() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let store = DocumentStorePostgres::new(Arc::new(db), "postgres://unused".to_string());

        let result = store.write(&PortfolioDocument::default()).await;
        assert!(result.is_ok());
    }
}
