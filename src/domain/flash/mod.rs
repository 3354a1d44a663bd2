//! Flash domain module.
//!
//! A flash session is one user's burst of short messages, accumulated in
//! arrival order until the user goes quiet and the burst is committed as a
//! single note.
//!
//! # Types
//!
//! - `Fragment` - One inbound message unit (text, image, or file)
//! - `FlashSession` - A user's in-progress accumulation of fragments
//! - `FlashFilter` - Decides which inbound text is worth recording
//! - `tags` - `#tag` extraction and placement rules

mod errors;
mod filter;
mod fragment;
mod session;
pub mod tags;

pub use errors::SessionError;
pub use filter::{FilterRejection, FlashFilter};
pub use fragment::{Fragment, FragmentKind};
pub use session::FlashSession;
