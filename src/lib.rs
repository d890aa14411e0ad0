//! TUI Wordtris (workspace facade crate).
//!
//! Re-exports the member crates under `tui_wordtris::{core,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use tui_wordtris_core as core;
pub use tui_wordtris_input as input;
pub use tui_wordtris_term as term;
pub use tui_wordtris_types as types;
