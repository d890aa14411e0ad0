//! Snapshot module - plain structural copy of a game for persistence
//!
//! The core never touches storage. Callers serialize [`GameSnapshot`] with
//! serde in whatever format they like and hand it back to
//! [`GameState::restore`](crate::GameState::restore).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::BoardCell;
use crate::pieces::Tetromino;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Rows top to bottom, `None` for empty cells.
    pub board: Vec<Vec<BoardCell>>,
    pub active: Option<Tetromino>,
    pub next: Tetromino,
    pub held: Option<Tetromino>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    #[serde(default)]
    pub words: u32,
    pub speed_ms: u32,
    pub paused: bool,
    pub game_over: bool,
}

/// Why a snapshot could not be restored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("board has {found} rows, expected {expected}")]
    BoardHeight { found: usize, expected: usize },

    #[error("board row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("board cell ({x}, {y}) holds a blank cell")]
    BlankCell { x: usize, y: usize },

    #[error("level must be at least 1")]
    ZeroLevel,

    #[error("drop speed must be positive")]
    ZeroSpeed,

    #[error("active piece overlaps the board")]
    ActiveOverlaps,

    #[error("{slot} piece has a malformed cell matrix")]
    InvalidPiece { slot: &'static str },

    #[error("finished game still has an active piece")]
    ActiveAfterGameOver,
}
