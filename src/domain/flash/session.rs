//! FlashSession value type.

use serde::{Deserialize, Serialize};

use super::Fragment;
use crate::domain::foundation::{Timestamp, UserId};

/// One user's in-progress accumulation of fragments awaiting commit.
///
/// # Invariants
///
/// - `messages` is never empty; a session only exists together with its
///   first fragment
/// - `messages` keeps arrival order
///
/// The pending timeout is owned by the session store, not by this value,
/// so a session handed to an observer carries no live timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashSession {
    user_id: UserId,
    messages: Vec<Fragment>,
    created_at: Timestamp,
}

impl FlashSession {
    /// Creates a session holding its first fragment. The session is as old
    /// as that fragment.
    pub fn new(user_id: UserId, first: Fragment) -> Self {
        Self {
            user_id,
            created_at: *first.captured_at(),
            messages: vec![first],
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Fragments in arrival order.
    pub fn messages(&self) -> &[Fragment] {
        &self.messages
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Concatenates the text fragments with newlines, skipping attachments.
    pub fn text_content(&self) -> String {
        self.messages
            .iter()
            .filter(|f| f.is_text())
            .map(|f| f.content())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn push(&mut self, fragment: Fragment) {
        self.messages.push(fragment);
    }
}
