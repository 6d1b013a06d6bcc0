use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, watch, RwLock};
use tracing::{error, info, warn};

use crate::portfolio::application::ports::outgoing::DocumentStore;
use crate::portfolio::domain::document::{PortfolioDocument, Project, Resume};
use crate::portfolio::domain::patch::{
    NewProject, NewResume, ProjectPatch, ResumePatch, SectionPatch,
};

#[derive(Debug, Clone)]
pub enum PortfolioError {
    /// No confirmed snapshot yet; mutations are only available once the
    /// first subscription delivery has arrived.
    NotReady,
}

impl std::fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioError::NotReady => write!(f, "Portfolio document is still loading"),
        }
    }
}

impl std::error::Error for PortfolioError {}

/// The portfolio state controller. Owns the in-memory copy of the shared
/// document, applies local mutations optimistically and pushes the full
/// merged result back to the store without waiting for confirmation.
#[async_trait]
pub trait IPortfolioService: Send + Sync {
    /// Current in-memory document; `None` while still loading.
    async fn snapshot(&self) -> Option<PortfolioDocument>;

    /// In-process change feed: holds the latest snapshot and updates on
    /// every accepted local mutation or remote replacement. Dropping the
    /// receiver unsubscribes.
    fn watch(&self) -> watch::Receiver<Option<PortfolioDocument>>;

    async fn update_section(
        &self,
        patch: SectionPatch,
    ) -> Result<PortfolioDocument, PortfolioError>;

    async fn add_project(&self, draft: NewProject) -> Result<Project, PortfolioError>;
    async fn update_project(
        &self,
        id: i64,
        patch: ProjectPatch,
    ) -> Result<PortfolioDocument, PortfolioError>;
    async fn delete_project(&self, id: i64) -> Result<PortfolioDocument, PortfolioError>;

    async fn add_resume(&self, draft: NewResume) -> Result<Resume, PortfolioError>;
    async fn update_resume(
        &self,
        id: i64,
        patch: ResumePatch,
    ) -> Result<PortfolioDocument, PortfolioError>;
    async fn delete_resume(&self, id: i64) -> Result<PortfolioDocument, PortfolioError>;
}

enum DocumentState {
    Loading,
    Ready(PortfolioDocument),
}

pub struct PortfolioService<S: DocumentStore> {
    store: Arc<S>,
    state: RwLock<DocumentState>,
    updates: watch::Sender<Option<PortfolioDocument>>,
    last_issued_id: AtomicI64,
    failed_saves: Arc<AtomicU64>,
}

impl<S: DocumentStore + 'static> PortfolioService<S> {
    pub fn new(store: Arc<S>) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            store,
            state: RwLock::new(DocumentState::Loading),
            updates,
            last_issued_id: AtomicI64::new(0),
            failed_saves: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Writes that failed after the optimistic local apply. The in-memory
    /// state is never rolled back; this counter is the only trace.
    pub fn failed_saves(&self) -> u64 {
        self.failed_saves.load(Ordering::Relaxed)
    }

    /// Consumes the store subscription until it closes. Run once, spawned
    /// at startup. The Loading -> Ready transition happens on the first
    /// delivery and is never reversed; a subscription failure finishes
    /// loading with the default document so consumers are never stuck.
    pub async fn run_subscription(self: Arc<Self>) {
        let subscription = match self.store.subscribe().await {
            Ok(subscription) => subscription,
            Err(e) => {
                error!("Portfolio subscription failed: {}", e);
                self.install_snapshot(PortfolioDocument::default()).await;
                return;
            }
        };

        match subscription.initial {
            Some(document) => {
                info!("Portfolio document loaded from store");
                self.install_snapshot(document).await;
            }
            None => {
                // First run: initialize and persist the fixed default.
                info!("No portfolio document found, writing the default");
                let document = PortfolioDocument::default();
                if let Err(e) = self.store.write(&document).await {
                    error!("Failed to persist the default portfolio document: {}", e);
                    self.failed_saves.fetch_add(1, Ordering::Relaxed);
                }
                self.install_snapshot(document).await;
            }
        }

        let mut changes = subscription.changes;
        loop {
            match changes.recv().await {
                // Remote snapshots replace local state wholesale; pending
                // local writes are not reconciled against them.
                Ok(document) => self.install_snapshot(document).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Portfolio change stream lagged, skipped {} snapshots", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => {
                    warn!("Portfolio change stream closed");
                    break;
                }
            }
        }
    }

    async fn install_snapshot(&self, document: PortfolioDocument) {
        self.observe_ids(&document);
        {
            let mut state = self.state.write().await;
            *state = DocumentState::Ready(document.clone());
        }
        let _ = self.updates.send(Some(document));
    }

    /// Keeps the id clock ahead of every id already present, so ids stay
    /// unique even against entries created by another session.
    fn observe_ids(&self, document: &PortfolioDocument) {
        let highest = document
            .projects
            .iter()
            .map(|p| p.id)
            .chain(document.resumes.iter().map(|r| r.id))
            .max()
            .unwrap_or(0);
        self.last_issued_id.fetch_max(highest, Ordering::SeqCst);
    }

    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        loop {
            let last = self.last_issued_id.load(Ordering::SeqCst);
            let id = now.max(last + 1);
            if self
                .last_issued_id
                .compare_exchange(last, id, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return id;
            }
        }
    }

    /// Two-phase optimistic mutation: apply to the in-memory copy under the
    /// write lock, publish the new snapshot, then fire the persistence
    /// write without blocking the caller or waiting for confirmation.
    async fn mutate<T, F>(&self, apply: F) -> Result<T, PortfolioError>
    where
        F: FnOnce(&mut PortfolioDocument) -> T,
    {
        let (out, updated) = {
            let mut state = self.state.write().await;
            let document = match &mut *state {
                DocumentState::Ready(document) => document,
                DocumentState::Loading => return Err(PortfolioError::NotReady),
            };
            let out = apply(document);
            (out, document.clone())
        };

        let _ = self.updates.send(Some(updated.clone()));
        self.persist(updated);
        Ok(out)
    }

    fn persist(&self, document: PortfolioDocument) {
        let store = Arc::clone(&self.store);
        let failed_saves = Arc::clone(&self.failed_saves);
        tokio::spawn(async move {
            if let Err(e) = store.write(&document).await {
                // Optimistic state is not rolled back; the operator is told
                // to try again while the UI keeps the attempted change.
                error!("Failed to persist portfolio document: {}", e);
                failed_saves.fetch_add(1, Ordering::Relaxed);
            }
        });
    }
}

#[async_trait]
impl<S: DocumentStore + 'static> IPortfolioService for PortfolioService<S> {
    async fn snapshot(&self) -> Option<PortfolioDocument> {
        match &*self.state.read().await {
            DocumentState::Ready(document) => Some(document.clone()),
            DocumentState::Loading => None,
        }
    }

    fn watch(&self) -> watch::Receiver<Option<PortfolioDocument>> {
        self.updates.subscribe()
    }

    async fn update_section(
        &self,
        patch: SectionPatch,
    ) -> Result<PortfolioDocument, PortfolioError> {
        self.mutate(|document| {
            patch.apply(document);
            document.clone()
        })
        .await
    }

    async fn add_project(&self, draft: NewProject) -> Result<Project, PortfolioError> {
        self.mutate(|document| {
            let project = draft.into_project(self.next_id());
            document.projects.push(project.clone());
            project
        })
        .await
    }

    async fn update_project(
        &self,
        id: i64,
        patch: ProjectPatch,
    ) -> Result<PortfolioDocument, PortfolioError> {
        self.mutate(|document| {
            // Absent id is a silent no-op, not an error.
            if let Some(project) = document.projects.iter_mut().find(|p| p.id == id) {
                patch.apply(project);
            }
            document.clone()
        })
        .await
    }

    async fn delete_project(&self, id: i64) -> Result<PortfolioDocument, PortfolioError> {
        self.mutate(|document| {
            document.projects.retain(|p| p.id != id);
            document.clone()
        })
        .await
    }

    async fn add_resume(&self, draft: NewResume) -> Result<Resume, PortfolioError> {
        self.mutate(|document| {
            let resume = draft.into_resume(self.next_id());
            document.resumes.push(resume.clone());
            resume
        })
        .await
    }

    async fn update_resume(
        &self,
        id: i64,
        patch: ResumePatch,
    ) -> Result<PortfolioDocument, PortfolioError> {
        self.mutate(|document| {
            if let Some(resume) = document.resumes.iter_mut().find(|r| r.id == id) {
                patch.apply(resume);
            }
            document.clone()
        })
        .await
    }

    async fn delete_resume(&self, id: i64) -> Result<PortfolioDocument, PortfolioError> {
        self.mutate(|document| {
            document.resumes.retain(|r| r.id != id);
            document.clone()
        })
        .await
    }
}
