//! Board module - the lettered game grid
//!
//! The board is a 10x20 grid where each cell is either empty (`None`) or a
//! committed lettered [`Cell`]. Uses a flat array for cache locality and
//! zero-allocation hot paths.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).

use arrayvec::ArrayVec;

use crate::collision::check_collision;
use crate::pieces::{spawn_position, Tetromino};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// A board slot: `None` when empty.
pub type BoardCell = Option<Cell>;

/// Row indices of completed lines (never more than the board height).
pub type CompletedLines = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [BoardCell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<BoardCell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: BoardCell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Letter at (x, y); `None` for empty or out-of-bounds cells.
    pub fn letter_at(&self, x: i8, y: i8) -> Option<char> {
        self.get(x, y).flatten().and_then(|cell| cell.letter())
    }

    /// One row as a slice, `None` past the bottom.
    pub fn row(&self, y: usize) -> Option<&[BoardCell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[BoardCell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Indices of every completed row, top to bottom.
    pub fn find_completed_lines(&self) -> CompletedLines {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove every completed row and return how many were removed.
    ///
    /// Remaining rows keep their relative order and settle at the bottom;
    /// the same number of empty rows appears at the top. Two-pointer pass,
    /// no allocation.
    pub fn clear_lines(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut cleared = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Commit every occupied cell of `piece` at its position.
    ///
    /// Cells that fall outside the board are ignored.
    pub fn place_piece(&mut self, piece: &Tetromino) {
        for (x, y, cell) in piece.board_cells() {
            self.set(x, y, Some(cell));
        }
    }

    /// Remove the letters of `word` and let the remaining cells fall.
    ///
    /// For each letter of the word in order, the first cell in row-major
    /// scan order carrying that letter is emptied. Letters the board does not
    /// have (or has fewer of) are skipped. Matching is by letter value only,
    /// so with repeated letters the removed cells need not be the traced ones.
    /// Returns the number of cells removed.
    pub fn remove_word_letters(&mut self, word: &str) -> usize {
        let mut removed = 0;
        for letter in word.chars() {
            let hit = self
                .cells
                .iter()
                .position(|cell| cell.and_then(|c| c.letter()) == Some(letter));
            if let Some(idx) = hit {
                self.cells[idx] = None;
                removed += 1;
            }
        }
        self.apply_gravity();
        removed
    }

    /// Compact every column downward, keeping the vertical order of its cells.
    pub fn apply_gravity(&mut self) {
        let width = BOARD_WIDTH as usize;
        for x in 0..width {
            let mut write_y = BOARD_HEIGHT as usize;
            for read_y in (0..BOARD_HEIGHT as usize).rev() {
                let cell = self.cells[read_y * width + x];
                if cell.is_some() {
                    write_y -= 1;
                    self.cells[read_y * width + x] = None;
                    self.cells[write_y * width + x] = cell;
                }
            }
        }
    }

    /// True when `piece`, placed at its spawn position, overlaps the board.
    pub fn check_game_over(&self, piece: &Tetromino) -> bool {
        check_collision(piece, self, Some(spawn_position(piece.kind)))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[BoardCell] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build from rows, `None` if the dimensions do not match the board.
    pub fn from_rows(rows: &[Vec<BoardCell>]) -> Option<Self> {
        if rows.len() != BOARD_HEIGHT as usize
            || rows.iter().any(|row| row.len() != BOARD_WIDTH as usize)
        {
            return None;
        }

        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            board.cells[start..start + row.len()].copy_from_slice(row);
        }
        Some(board)
    }

    /// Convert to owned rows (snapshot/display)
    pub fn to_rows(&self) -> Vec<Vec<BoardCell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
