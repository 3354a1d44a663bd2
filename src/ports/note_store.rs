//! NoteStore port - Interface for the external note service.
//!
//! A committed flash session becomes exactly one `create` call. The core
//! does not retry; a failed create is logged and the content is lost.

use async_trait::async_trait;
use thiserror::Error;

/// Port for persisting committed notes.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Creates one note.
    ///
    /// `content` already carries every tag as `#tag` text; `tags` is the
    /// same set as a list for stores that take tags out of band.
    async fn create(&self, content: &str, tags: &[String]) -> Result<CreatedNote, NoteStoreError>;
}

/// What the note service reported back for a created note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatedNote {
    /// Service-assigned note id, when the service returns one.
    pub id: Option<i64>,
}

impl CreatedNote {
    pub fn with_id(id: i64) -> Self {
        Self { id: Some(id) }
    }
}

/// Note service failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteStoreError {
    /// Transport failure before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Service answered with a non-success status.
    #[error("note service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Service refused the note.
    #[error("note rejected: {0}")]
    Rejected(String),
}

impl NoteStoreError {
    pub fn network(message: impl Into<String>) -> Self {
        NoteStoreError::Network(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        NoteStoreError::Rejected(message.into())
    }
}
