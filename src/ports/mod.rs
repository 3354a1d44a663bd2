//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the flash session core and the outside world. Adapters implement these
//! ports.
//!
//! - `SessionObserver` - Subscriber notified when a session times out
//! - `NoteStore` - External note service, one `create` per commit
//! - `FragmentRenderer` - Pure rendering of attachment fragments

mod fragment_renderer;
mod note_store;
mod session_observer;

pub use fragment_renderer::{FragmentRenderer, RenderError};
pub use note_store::{CreatedNote, NoteStore, NoteStoreError};
pub use session_observer::SessionObserver;
