//! TimeoutDispatcher - Commits timed-out flash sessions as notes.
//!
//! Registered as a `SessionObserver`. For every session it merges the
//! fragments into one note body, gathers tags, and makes a single
//! `NoteStore::create` call. Failures are logged and swallowed; the
//! session store never sees them.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::flash::{tags, FlashSession};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{CreatedNote, FragmentRenderer, NoteStore, NoteStoreError, SessionObserver};

/// Knobs applied when turning a session into note content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSettings {
    /// Tag added to every committed note, without the `#`.
    pub default_tag: Option<String>,
    /// Maximum note length in characters; 0 means unlimited.
    pub max_content_length: usize,
}

/// Note body and tags produced from one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedNote {
    pub content: String,
    pub tags: Vec<String>,
    pub truncated: bool,
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub user_id: UserId,
    pub content: String,
    pub tags: Vec<String>,
    pub note: CreatedNote,
}

/// Commit failures.
#[derive(Debug, Clone, Error)]
pub enum CommitError {
    #[error("note store failed for user {user_id}: {source}")]
    NoteStore {
        user_id: UserId,
        #[source]
        source: NoteStoreError,
    },
}

/// Observer that persists timed-out sessions.
pub struct TimeoutDispatcher {
    renderer: Arc<dyn FragmentRenderer>,
    notes: Arc<dyn NoteStore>,
    settings: CommitSettings,
}

impl TimeoutDispatcher {
    pub fn new(
        renderer: Arc<dyn FragmentRenderer>,
        notes: Arc<dyn NoteStore>,
        settings: CommitSettings,
    ) -> Self {
        Self {
            renderer,
            notes,
            settings,
        }
    }

    /// Merges a session into note content.
    ///
    /// Text fragments go in verbatim, attachments through the renderer; a
    /// failed render becomes a placeholder instead of aborting the merge.
    pub fn compose(&self, session: &FlashSession) -> ComposedNote {
        let mut parts = Vec::with_capacity(session.len());
        let mut all_tags = BTreeSet::new();

        for fragment in session.messages() {
            if fragment.is_text() {
                all_tags.extend(tags::extract_tags(fragment.content()));
                parts.push(fragment.content().to_string());
                continue;
            }

            match self.renderer.render(fragment) {
                Ok(rendered) => parts.push(rendered),
                Err(e) => {
                    tracing::warn!(
                        user_id = %session.user_id(),
                        kind = %fragment.kind(),
                        error = %e,
                        "Attachment could not be rendered, using placeholder"
                    );
                    parts.push(format!("[{} unavailable]", fragment.kind()));
                }
            }
        }

        if let Some(tag) = self.default_tag() {
            all_tags.insert(tag);
        }

        let content = tags::append_missing_tags(&parts.join("\n"), &all_tags);
        let (content, truncated) = self.truncate(content);
        if truncated {
            tracing::warn!(
                user_id = %session.user_id(),
                max = self.settings.max_content_length,
                "Note content truncated"
            );
        }

        ComposedNote {
            content,
            tags: all_tags.into_iter().collect(),
            truncated,
        }
    }

    /// Composes and persists one session.
    ///
    /// # Errors
    ///
    /// - `NoteStore` if the note service rejected or never received the note
    pub async fn commit(&self, session: &FlashSession) -> Result<CommitReceipt, CommitError> {
        let composed = self.compose(session);

        let note = self
            .notes
            .create(&composed.content, &composed.tags)
            .await
            .map_err(|source| CommitError::NoteStore {
                user_id: session.user_id().clone(),
                source,
            })?;

        Ok(CommitReceipt {
            user_id: session.user_id().clone(),
            content: composed.content,
            tags: composed.tags,
            note,
        })
    }

    fn default_tag(&self) -> Option<String> {
        self.settings
            .default_tag
            .as_deref()
            .map(|t| t.trim().trim_start_matches('#'))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn truncate(&self, content: String) -> (String, bool) {
        let max = self.settings.max_content_length;
        if max == 0 || content.chars().count() <= max {
            return (content, false);
        }
        let mut cut: String = content.chars().take(max).collect();
        cut.push_str("...");
        (cut, true)
    }
}

#[async_trait]
impl SessionObserver for TimeoutDispatcher {
    async fn on_session_timeout(&self, session: FlashSession) -> Result<(), DomainError> {
        match self.commit(&session).await {
            Ok(receipt) => {
                tracing::info!(
                    user_id = %receipt.user_id,
                    note_id = ?receipt.note.id,
                    fragments = session.len(),
                    tags = ?receipt.tags,
                    "Flash note saved"
                );
            }
            Err(e) => {
                tracing::error!(
                    user_id = %session.user_id(),
                    fragments = session.len(),
                    error = %e,
                    "Failed to save flash note"
                );
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TimeoutDispatcher"
    }
}
