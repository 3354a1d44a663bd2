//! FlushSessionsHandler - Shutdown path that commits every live session.
//!
//! Drains the store, commits each drained session through the dispatcher,
//! then waits for timeouts that were already being committed when the
//! drain happened.

use std::sync::Arc;

use super::timeout_dispatcher::{CommitError, CommitReceipt, TimeoutDispatcher};
use crate::application::SessionStore;

/// Outcome of a flush.
#[derive(Debug, Default)]
pub struct FlushReport {
    pub committed: Vec<CommitReceipt>,
    pub failed: Vec<CommitError>,
}

impl FlushReport {
    pub fn total(&self) -> usize {
        self.committed.len() + self.failed.len()
    }
}

/// Handler for the shutdown flush.
pub struct FlushSessionsHandler {
    store: SessionStore,
    dispatcher: Arc<TimeoutDispatcher>,
}

impl FlushSessionsHandler {
    pub fn new(store: SessionStore, dispatcher: Arc<TimeoutDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    pub async fn handle(&self) -> FlushReport {
        let mut report = FlushReport::default();

        for session in self.store.drain_all().await {
            match self.dispatcher.commit(&session).await {
                Ok(receipt) => report.committed.push(receipt),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to save flash note during flush");
                    report.failed.push(e);
                }
            }
        }

        self.store.wait_for_pending_notifications().await;

        tracing::info!(
            committed = report.committed.len(),
            failed = report.failed.len(),
            "Flash sessions flushed"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryNoteStore, MarkdownLinkRenderer};
    use crate::application::CommitSettings;
    use crate::domain::flash::Fragment;
    use crate::domain::foundation::UserId;
    use std::time::Duration;

    fn handler(notes: Arc<InMemoryNoteStore>) -> (SessionStore, FlushSessionsHandler) {
        let store = SessionStore::new(Duration::from_secs(60));
        let dispatcher = Arc::new(TimeoutDispatcher::new(
            Arc::new(MarkdownLinkRenderer::new()),
            notes,
            CommitSettings::default(),
        ));
        (store.clone(), FlushSessionsHandler::new(store, dispatcher))
    }

    #[tokio::test]
    async fn flush_commits_every_live_session() {
        let notes = Arc::new(InMemoryNoteStore::new());
        let (store, flush) = handler(notes.clone());
        store.start(UserId::new("a").unwrap(), Fragment::text("alpha")).await;
        store.start(UserId::new("b").unwrap(), Fragment::text("beta")).await;

        let report = flush.handle().await;

        assert_eq!(report.committed.len(), 2);
        assert_eq!(report.total(), 2);
        assert_eq!(notes.note_count().await, 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn flush_reports_failures() {
        let notes = Arc::new(InMemoryNoteStore::failing());
        let (store, flush) = handler(notes);
        store.start(UserId::new("a").unwrap(), Fragment::text("alpha")).await;

        let report = flush.handle().await;

        assert!(report.committed.is_empty());
        assert_eq!(report.failed.len(), 1);
    }

    #[tokio::test]
    async fn flush_of_empty_store_is_empty() {
        let (_, flush) = handler(Arc::new(InMemoryNoteStore::new()));
        assert_eq!(flush.handle().await.total(), 0);
    }
}
