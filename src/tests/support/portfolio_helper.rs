use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::{timeout, Duration};

use crate::modules::portfolio::application::ports::outgoing::{
    DocumentStore, DocumentStoreError, DocumentSubscription,
};
use crate::modules::portfolio::application::service::{IPortfolioService, PortfolioService};
use crate::modules::portfolio::domain::document::PortfolioDocument;

/// In-memory store for handler tests, so routes run against the real
/// service instead of a hand-rolled mock of every operation.
pub struct InMemoryDocumentStore {
    document: Mutex<Option<PortfolioDocument>>,
    remote_changes: broadcast::Sender<PortfolioDocument>,
}

impl InMemoryDocumentStore {
    pub fn empty() -> Self {
        let (remote_changes, _) = broadcast::channel(16);
        Self {
            document: Mutex::new(None),
            remote_changes,
        }
    }

    pub fn with_document(document: PortfolioDocument) -> Self {
        let store = Self::empty();
        *store.document.lock().unwrap() = Some(document);
        store
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn read(&self) -> Result<Option<PortfolioDocument>, DocumentStoreError> {
        Ok(self.document.lock().unwrap().clone())
    }

    async fn write(&self, document: &PortfolioDocument) -> Result<(), DocumentStoreError> {
        *self.document.lock().unwrap() = Some(document.clone());
        Ok(())
    }

    async fn subscribe(&self) -> Result<DocumentSubscription, DocumentStoreError> {
        Ok(DocumentSubscription {
            initial: self.document.lock().unwrap().clone(),
            changes: self.remote_changes.subscribe(),
        })
    }
}

/// A running service that already holds the given document.
pub async fn ready_portfolio_service(
    document: PortfolioDocument,
) -> Arc<PortfolioService<InMemoryDocumentStore>> {
    let store = Arc::new(InMemoryDocumentStore::with_document(document));
    let service = Arc::new(PortfolioService::new(store));
    tokio::spawn(Arc::clone(&service).run_subscription());

    let mut watch = service.watch();
    timeout(Duration::from_secs(1), watch.wait_for(|v| v.is_some()))
        .await
        .expect("service did not become ready")
        .expect("watch channel closed");
    service
}
