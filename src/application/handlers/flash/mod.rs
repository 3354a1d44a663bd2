//! Flash session handlers.

mod cancel_flash;
mod flush_sessions;
mod ingest_message;
mod timeout_dispatcher;

pub use cancel_flash::{CancelFlashCommand, CancelFlashHandler, CancelFlashResult};
pub use flush_sessions::{FlushReport, FlushSessionsHandler};
pub use ingest_message::{IngestMessageCommand, IngestMessageHandler, IngestOutcome};
pub use timeout_dispatcher::{
    CommitError, CommitReceipt, CommitSettings, ComposedNote, TimeoutDispatcher,
};
