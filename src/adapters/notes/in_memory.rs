//! In-memory note store for tests and dry runs.
//!
//! Records every created note instead of sending it anywhere. Can be
//! switched into a failing mode to exercise commit-failure paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::ports::{CreatedNote, NoteStore, NoteStoreError};

/// A note captured by [`InMemoryNoteStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNote {
    pub id: i64,
    pub content: String,
    pub tags: Vec<String>,
}

/// Note store that keeps notes in memory.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryNoteStore::new());
/// dispatcher.commit(&session).await?;
/// assert_eq!(store.note_count().await, 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    notes: RwLock<Vec<StoredNote>>,
    next_id: AtomicI64,
    failing: AtomicBool,
}

impl InMemoryNoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose `create` always fails.
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    /// Switches failure mode on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    /// Returns all stored notes in creation order.
    pub async fn notes(&self) -> Vec<StoredNote> {
        self.notes.read().await.clone()
    }

    /// Returns count of stored notes.
    pub async fn note_count(&self) -> usize {
        self.notes.read().await.len()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn create(&self, content: &str, tags: &[String]) -> Result<CreatedNote, NoteStoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NoteStoreError::rejected("in-memory store set to fail"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.notes.write().await.push(StoredNote {
            id,
            content: content.to_string(),
            tags: tags.to_vec(),
        });
        Ok(CreatedNote::with_id(id))
    }
}
