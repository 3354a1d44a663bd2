//! CancelFlashHandler - Discards a user's flash session without saving it.

use crate::application::SessionStore;
use crate::domain::flash::{FlashSession, SessionError};
use crate::domain::foundation::UserId;

/// Command to discard the user's live session.
#[derive(Debug, Clone)]
pub struct CancelFlashCommand {
    pub user_id: UserId,
}

/// Result of a successful cancel.
#[derive(Debug, Clone)]
pub struct CancelFlashResult {
    pub session: FlashSession,
}

/// Handler for explicit cancels.
pub struct CancelFlashHandler {
    store: SessionStore,
}

impl CancelFlashHandler {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CancelFlashCommand) -> Result<CancelFlashResult, SessionError> {
        let session = self.store.cancel(&cmd.user_id).await?;
        tracing::info!(
            user_id = %cmd.user_id,
            fragments = session.len(),
            "Flash session discarded by user"
        );
        Ok(CancelFlashResult { session })
    }
}
