//! Application handlers.
//!
//! Command handlers that orchestrate flash session operations.

pub mod flash;

pub use flash::{
    CancelFlashCommand, CancelFlashHandler, CancelFlashResult, CommitError, CommitReceipt,
    CommitSettings, ComposedNote, FlushReport, FlushSessionsHandler, IngestMessageCommand,
    IngestMessageHandler, IngestOutcome, TimeoutDispatcher,
};
