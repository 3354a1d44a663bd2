//! Note store adapters.
//!
//! - `BlinkoNoteStore` - HTTP client for a Blinko-compatible note service
//! - `InMemoryNoteStore` - Recording store for tests and dry runs

mod blinko;
mod in_memory;

pub use blinko::{BlinkoConfig, BlinkoNoteStore};
pub use in_memory::{InMemoryNoteStore, StoredNote};
