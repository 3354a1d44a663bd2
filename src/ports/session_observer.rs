//! SessionObserver port - Interface for reacting to flash session timeouts.
//!
//! The session store fans every timeout out to its registered observers.
//! Observers never see a session that is still reachable through the store.

use async_trait::async_trait;

use crate::domain::flash::FlashSession;
use crate::domain::foundation::DomainError;

/// Subscriber notified when a flash session goes quiet.
///
/// Implementations should be:
/// - **Isolated** - An error or panic is logged by the store and does not
///   reach other observers
/// - **Self-contained** - The store does not retry; anything worth retrying
///   must be retried inside the observer
///
/// # Example
///
/// ```ignore
/// struct AuditLog;
///
/// #[async_trait]
/// impl SessionObserver for AuditLog {
///     async fn on_session_timeout(&self, session: FlashSession) -> Result<(), DomainError> {
///         tracing::info!(user_id = %session.user_id(), "session timed out");
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "AuditLog"
///     }
/// }
/// ```
#[async_trait]
pub trait SessionObserver: Send + Sync {
    /// Called exactly once for each session whose idle duration elapsed.
    async fn on_session_timeout(&self, session: FlashSession) -> Result<(), DomainError>;

    /// Observer name for logging.
    fn name(&self) -> &'static str;
}
