//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the flash session core to external systems:
//! - `notes` - Note store implementations (Blinko HTTP, in-memory)
//! - `render` - Fragment renderers (Markdown links)

pub mod notes;
pub mod render;

pub use notes::{BlinkoConfig, BlinkoNoteStore, InMemoryNoteStore, StoredNote};
pub use render::MarkdownLinkRenderer;
