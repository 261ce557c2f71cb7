//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Action`] and provides a
//! per-action debouncer, so a held key is applied at a steady rate instead of
//! once per poll.

pub mod debounce;
pub mod map;

pub use blockfall_types as types;

pub use debounce::Debouncer;
pub use map::{handle_key_event, should_quit, should_restart};
