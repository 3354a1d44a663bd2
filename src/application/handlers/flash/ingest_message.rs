//! IngestMessageHandler - Routes an inbound message into a flash session.

use crate::application::{SessionDisposition, SessionStore};
use crate::domain::flash::{FilterRejection, FlashFilter, FlashSession, Fragment};
use crate::domain::foundation::UserId;

/// Command carrying one inbound fragment.
#[derive(Debug, Clone)]
pub struct IngestMessageCommand {
    pub user_id: UserId,
    pub fragment: Fragment,
}

/// What happened to the fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Filtered out; no session touched.
    Ignored(FilterRejection),
    /// Opened a new session.
    Started(FlashSession),
    /// Extended the live session and reset its timer.
    Appended(FlashSession),
}

/// Handler for inbound messages.
pub struct IngestMessageHandler {
    store: SessionStore,
    filter: FlashFilter,
}

impl IngestMessageHandler {
    pub fn new(store: SessionStore, filter: FlashFilter) -> Self {
        Self { store, filter }
    }

    pub async fn handle(&self, cmd: IngestMessageCommand) -> IngestOutcome {
        if let Err(rejection) = self.filter.check(&cmd.fragment) {
            tracing::debug!(user_id = %cmd.user_id, reason = %rejection, "Message not recorded");
            return IngestOutcome::Ignored(rejection);
        }

        match self.store.append_or_start(cmd.user_id, cmd.fragment).await {
            (session, SessionDisposition::Started) => IngestOutcome::Started(session),
            (session, SessionDisposition::Appended) => IngestOutcome::Appended(session),
        }
    }
}
