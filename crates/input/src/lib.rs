//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and mouse
//! events into board-space [`crate::types::PointerEvent`]s. Nothing here
//! knows about game rules; the caller decides what an action or pointer
//! event does.

pub mod map;
pub mod pointer;

pub use tui_wordtris_types as types;

pub use map::{handle_key_event, is_trace_cancel, should_quit, KEY_BINDINGS};
pub use pointer::map_mouse_event;
