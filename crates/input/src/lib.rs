//! Terminal input module (session-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and interprets
//! pointer press/release pairs as swipe gestures that select a swap.

pub mod gesture;
pub mod map;

pub use tui_match3_types as types;

pub use gesture::{swipe_target, GestureTracker};
pub use map::{handle_key_event, should_quit};
