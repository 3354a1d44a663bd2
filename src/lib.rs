//! FlashNote - Debounced capture of chat messages into notes
//!
//! Consecutive messages from one user are gathered into a flash session.
//! Once the user has been quiet for the idle timeout, the session is merged
//! into a single note and saved to the note service.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
