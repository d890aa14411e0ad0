//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of a falling-block puzzle where every block
//! carries a letter. Pieces fall, rotate with SRS wall kicks and clear full
//! rows as usual; on top of that the player traces words through adjacent
//! lettered cells, and accepted words are removed from the board before the
//! columns compact.
//!
//! Nothing here touches a terminal, a clock or the filesystem:
//!
//! - **Deterministic**: the same seed produces the same pieces and letters
//! - **Testable**: time is injected through [`scheduler::Clock`] or plain
//!   millisecond counts
//! - **Portable**: front ends only read state and feed actions/pointer events
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of lettered cells, line clearing, word removal, gravity
//! - [`collision`]: collision tests and SRS kick tables
//! - [`config`]: seed, start level, alphabet and word rules
//! - [`game_state`]: active/next/held pieces, scoring, word tracing
//! - [`letters`]: weighted letter tables (Russian, English)
//! - [`pieces`]: tetromino templates and letter-preserving rotation
//! - [`scheduler`]: gravity timing, word timeout and event reporting
//! - [`scoring`]: line/drop points, levels and drop intervals
//! - [`snapshot`]: serializable copy of a game
//! - [`word`]: path tracing and dictionaries
//!
//! # Example
//!
//! ```
//! use tui_wordtris_core::GameState;
//! use tui_wordtris_types::GameAction;
//!
//! let mut game = GameState::with_seed(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Gravity runs one row per [`GameState::speed_ms`] milliseconds, starting at
//! 1000 ms on level 1 and speeding up every 10 lines. Front ends poll input
//! roughly every 16 ms and hand the elapsed time to
//! [`Scheduler::advance`](scheduler::Scheduler::advance).

pub mod board;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod letters;
pub mod pieces;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;
pub mod word;

pub use tui_wordtris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{check_collision, rotate_with_kicks};
pub use config::{Alphabet, GameConfig};
pub use game_state::{GameState, WordOutcome};
pub use letters::LetterTable;
pub use pieces::Tetromino;
pub use scheduler::{Clock, EventSink, GameEvent, ManualClock, Scheduler, SystemClock};
pub use scoring::{drop_interval_ms, drop_score, level_for_lines, score_for_clear};
pub use snapshot::{GameSnapshot, SnapshotError};
pub use word::{AnyWord, Dictionary, TracedWord, WordList, WordTracer};
