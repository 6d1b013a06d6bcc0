use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::portfolio::domain::document::PortfolioDocument;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Stored document is malformed: {0}")]
    MalformedDocument(String),
    #[error("Subscription error: {0}")]
    SubscriptionError(String),
}

/// One registered interest in the shared document. `initial` is delivered
/// before the caller's rendering path continues (`None` means the document
/// does not exist yet); every later remote change arrives on `changes` as a
/// full replacement snapshot. Dropping the receiver unsubscribes.
pub struct DocumentSubscription {
    pub initial: Option<PortfolioDocument>,
    pub changes: broadcast::Receiver<PortfolioDocument>,
}

/// Connection to the remote document store holding the single portfolio
/// record. Writes are whole-document overwrites; the store performs no
/// field-level patching, so the last write to land wins at document
/// granularity regardless of which session issued it first.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the current document. `Ok(None)` means first run.
    async fn read(&self) -> Result<Option<PortfolioDocument>, DocumentStoreError>;

    /// Replaces the entire remote document.
    async fn write(&self, document: &PortfolioDocument) -> Result<(), DocumentStoreError>;

    /// Registers for the current snapshot plus every subsequent change.
    async fn subscribe(&self) -> Result<DocumentSubscription, DocumentStoreError>;
}
