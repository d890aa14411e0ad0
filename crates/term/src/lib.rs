//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a plain framebuffer that is diffed and flushed to the terminal, with
//! no widget toolkit in between.
//!
//! Board cells are 2 columns wide by default, which keeps them roughly square
//! and leaves room for the letter each block carries.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_wordtris_core as core;
pub use tui_wordtris_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{block_rgb, AnchorY, GameView, StatusLine, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
