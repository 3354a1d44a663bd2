//! Message fragments - the unit appended to a flash session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Kind of content a fragment carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Text,
    Image,
    File,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FragmentKind::Text => "text",
            FragmentKind::Image => "image",
            FragmentKind::File => "file",
        };
        write!(f, "{}", s)
    }
}

/// One inbound message unit.
///
/// Text fragments carry their raw content. Attachments carry an external
/// reference (usually a URL) and a display filename; their `content` is a
/// short human-readable stand-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    kind: FragmentKind,
    content: String,
    reference: Option<String>,
    filename: Option<String>,
    captured_at: Timestamp,
}

impl Fragment {
    /// Creates a text fragment captured now.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Text,
            content: content.into(),
            reference: None,
            filename: None,
            captured_at: Timestamp::now(),
        }
    }

    /// Creates an image fragment pointing at `url`.
    pub fn image(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Image,
            content: "[image]".to_string(),
            reference: Some(url.into()),
            filename: Some(filename.into()),
            captured_at: Timestamp::now(),
        }
    }

    /// Creates a file fragment. The reference is optional because some
    /// platforms only report the file name.
    pub fn file(filename: impl Into<String>, url: Option<String>) -> Self {
        let filename = filename.into();
        Self {
            kind: FragmentKind::File,
            content: format!("[file: {}]", filename),
            reference: url,
            filename: Some(filename),
            captured_at: Timestamp::now(),
        }
    }

    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn captured_at(&self) -> &Timestamp {
        &self.captured_at
    }

    pub fn is_text(&self) -> bool {
        self.kind == FragmentKind::Text
    }
}
