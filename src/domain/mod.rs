//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `flash` - Fragments, flash sessions, tag and filter rules

pub mod flash;
pub mod foundation;
