//! FragmentRenderer port - Turns attachment fragments into note text.

use thiserror::Error;

use crate::domain::flash::{Fragment, FragmentKind};

/// Pure conversion of one fragment into the text that stands for it in
/// the committed note.
///
/// A failure affects only the fragment being rendered; the commit path
/// substitutes a placeholder and carries on.
pub trait FragmentRenderer: Send + Sync {
    fn render(&self, fragment: &Fragment) -> Result<String, RenderError>;
}

/// Fragment rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Attachment has no URL to link to.
    #[error("{kind} fragment has no reference")]
    MissingReference { kind: FragmentKind },

    /// Reference is not something the renderer can link.
    #[error("unsupported reference '{reference}'")]
    UnsupportedReference { reference: String },
}
