//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with serde derives, so they can be used by the
//! core engine, the terminal front end and the snapshot format alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Drop Intervals by Level
//!
//! Levels start at 1. Gravity speeds up with level (milliseconds per row):
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 800ms |
//! | 3 | 650ms |
//! | 4 | 500ms |
//! | 5 | 400ms |
//! | 6 | 320ms |
//! | 7 | 250ms |
//! | 8 | 200ms |
//! | 9 | 160ms |
//! | 10+ | 120ms |
//!
//! # Examples
//!
//! ```
//! use tui_wordtris_types::{Cell, CellColor, PieceKind, Rotation, GameAction};
//!
//! let rotated = Rotation::North.rotate_cw();
//! assert_eq!(rotated, Rotation::East);
//!
//! let action = GameAction::from_str("rotateCw").unwrap();
//! assert_eq!(action, GameAction::RotateCw);
//!
//! let cell = Cell::filled('К', PieceKind::T.color());
//! assert_eq!(cell.letter(), Some('К'));
//! assert_eq!(Cell::blank(CellColor::Purple).letter(), None);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side of the square matrix every piece is stored in.
pub const PIECE_GRID: usize = 4;

/// Frame interval used by the terminal loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 1, Index 8 = Level 9
pub const DROP_INTERVALS: [u32; 9] = [BASE_DROP_MS, 800, 650, 500, 400, 320, 250, 200, 160];

/// Drop interval for every level past the table.
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points per number of lines cleared at once, multiplied by level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row for soft drop and hard drop.
pub const SOFT_DROP_POINTS: u32 = 1;
pub const HARD_DROP_POINTS: u32 = 2;

/// How long a word trace may sit idle before it is finished automatically.
pub const DEFAULT_WORD_TIMEOUT_MS: u32 = 3000;

/// Shortest word a dictionary lookup is attempted for.
pub const DEFAULT_MIN_WORD_LEN: usize = 3;

/// The seven tetromino piece kinds
///
/// Each kind has a fixed colour token:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in a fixed order (used for uniform random selection).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use tui_wordtris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("q"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Colour token carried by every cell of this kind.
    pub fn color(&self) -> CellColor {
        match self {
            PieceKind::I => CellColor::Cyan,
            PieceKind::O => CellColor::Yellow,
            PieceKind::T => CellColor::Purple,
            PieceKind::S => CellColor::Green,
            PieceKind::Z => CellColor::Red,
            PieceKind::J => CellColor::Blue,
            PieceKind::L => CellColor::Orange,
        }
    }
}

/// Rotation states (North = spawn orientation, numbered 0..=3 clockwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise: `(from + 1) % 4`
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise: `(from + 3) % 4`
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Orientation for an index, wrapping modulo 4.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Discrete commands accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Pause,
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Colour token of a cell; the presentation layer picks the actual colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellColor {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

/// A lettered block cell.
///
/// Blank cells only appear inside a piece's matrix, never on the board.
/// A blank cell never exposes a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    letter: char,
    pub color: CellColor,
    pub is_empty: bool,
}

impl Cell {
    pub const fn filled(letter: char, color: CellColor) -> Self {
        Self {
            letter,
            color,
            is_empty: false,
        }
    }

    pub const fn blank(color: CellColor) -> Self {
        Self {
            letter: ' ',
            color,
            is_empty: true,
        }
    }

    /// Displayed letter, `None` for blank cells.
    pub fn letter(&self) -> Option<char> {
        if self.is_empty {
            None
        } else {
            Some(self.letter)
        }
    }
}

/// Board coordinates of a piece's top-left corner. `y` may be negative
/// while a piece is partially above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// One step of a traced word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPosition {
    pub x: i8,
    pub y: i8,
    pub letter: char,
}

impl PathPosition {
    /// True when `other` is a 4-neighbour (Manhattan distance exactly 1).
    pub fn is_adjacent(&self, other: &PathPosition) -> bool {
        let dx = (self.x as i16 - other.x as i16).abs();
        let dy = (self.y as i16 - other.y as i16).abs();
        dx + dy == 1
    }

    pub fn same_cell(&self, x: i8, y: i8) -> bool {
        self.x == x && self.y == y
    }
}

/// Pointer samples already translated to grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { x: i8, y: i8 },
    Move { x: i8, y: i8 },
    Up,
    Cancel,
}

/// Where the board is drawn on screen, for mapping pointer samples back to
/// grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Screen column of the left edge of cell (0, 0).
    pub origin_x: u16,
    /// Screen row of the top edge of cell (0, 0).
    pub origin_y: u16,
    /// Columns per board cell.
    pub cell_w: u16,
    /// Rows per board cell.
    pub cell_h: u16,
}

impl BoardLayout {
    /// Grid cell under a screen position, `None` outside the board.
    pub fn to_grid(&self, column: u16, row: u16) -> Option<(i8, i8)> {
        if column < self.origin_x || row < self.origin_y || self.cell_w == 0 || self.cell_h == 0 {
            return None;
        }
        let x = (column - self.origin_x) / self.cell_w;
        let y = (row - self.origin_y) / self.cell_h;
        if x >= BOARD_WIDTH as u16 || y >= BOARD_HEIGHT as u16 {
            return None;
        }
        Some((x as i8, y as i8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
        assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
        for i in 0..4u8 {
            let r = Rotation::from_index(i);
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
            assert_eq!(r.index(), i);
        }
    }

    #[test]
    fn test_line_score_table() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn test_blank_cell_hides_letter() {
        let blank = Cell::blank(CellColor::Red);
        assert!(blank.is_empty);
        assert_eq!(blank.letter(), None);
        assert_eq!(Cell::filled('Я', CellColor::Red).letter(), Some('Я'));
    }

    #[test]
    fn test_path_adjacency_excludes_diagonals() {
        let a = PathPosition { x: 2, y: 3, letter: 'А' };
        let below = PathPosition { x: 2, y: 4, letter: 'Б' };
        let diag = PathPosition { x: 3, y: 4, letter: 'В' };
        assert!(a.is_adjacent(&below));
        assert!(!a.is_adjacent(&diag));
        assert!(!a.is_adjacent(&a));
    }

    #[test]
    fn test_layout_to_grid() {
        let layout = BoardLayout {
            origin_x: 10,
            origin_y: 2,
            cell_w: 2,
            cell_h: 1,
        };
        assert_eq!(layout.to_grid(10, 2), Some((0, 0)));
        assert_eq!(layout.to_grid(11, 2), Some((0, 0)));
        assert_eq!(layout.to_grid(12, 5), Some((1, 3)));
        assert_eq!(layout.to_grid(9, 2), None);
        assert_eq!(layout.to_grid(10 + 20, 2), None);
        assert_eq!(layout.to_grid(10, 2 + 20), None);
    }
}
