//! Application layer - Session store and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod session_store;

pub use session_store::{SessionDisposition, SessionStore};

pub use handlers::{
    CancelFlashCommand, CancelFlashHandler, CancelFlashResult, CommitError, CommitReceipt,
    CommitSettings, ComposedNote, FlushReport, FlushSessionsHandler, IngestMessageCommand,
    IngestMessageHandler, IngestOutcome, TimeoutDispatcher,
};
