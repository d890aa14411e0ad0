//! Collision module - overlap tests and SRS wall kicks
//!
//! Implements the Super Rotation System (SRS) wall kick tables.
//! Reference: https://tetris.wiki/SRS
//!
//! The reference tables are written with y pointing up. The board's y axis
//! points down, so every `dy` below is negated relative to the wiki.

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::types::{PieceKind, Position, Rotation};

/// Ordered kick candidates for one rotation transition.
/// Entry 0 is the unkicked rotation.
pub type Kicks = [(i8, i8); 5];

/// Kick tables indexed by [`kick_index`].
pub type KickTable = [Kicks; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 1->0 (E->N)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->2 (E->S)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->1 (S->E)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->3 (S->W)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->2 (W->S)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->0 (W->N)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->3 (N->W)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
];

/// Table row for a `(from, to)` transition; `None` for pairs that are not a
/// single quarter turn.
pub fn kick_index(from: Rotation, to: Rotation) -> Option<usize> {
    use Rotation::*;
    match (from, to) {
        (North, East) => Some(0),
        (East, North) => Some(1),
        (East, South) => Some(2),
        (South, East) => Some(3),
        (South, West) => Some(4),
        (West, South) => Some(5),
        (West, North) => Some(6),
        (North, West) => Some(7),
        _ => None,
    }
}

/// Kick candidates for a kind and transition. O has none.
pub fn kick_offsets(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [(i8, i8)] {
    let table = match kind {
        PieceKind::O => return &[],
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    match kick_index(from, to) {
        Some(idx) => &table[idx],
        None => &[],
    }
}

/// Does `piece` overlap a wall, the floor or a filled cell?
///
/// Uses `position` when given, the piece's own position otherwise.
/// Cells above the board (y < 0) only count for the side walls.
pub fn check_collision(piece: &Tetromino, board: &Board, position: Option<Position>) -> bool {
    let position = position.unwrap_or(piece.position);
    let width = board.width() as i8;
    let height = board.height() as i8;

    piece.cells_at(position).any(|(x, y, _)| {
        x < 0 || x >= width || y >= height || (y >= 0 && board.is_occupied(x, y))
    })
}

/// True when moving one row down would collide.
pub fn has_landed(piece: &Tetromino, board: &Board) -> bool {
    check_collision(piece, board, Some(piece.position.offset(0, 1)))
}

/// Rotate with SRS wall kicks.
///
/// Candidates are tried in table order and the first free placement wins.
/// Returns `None` when every candidate collides. O is a geometric no-op and
/// always succeeds unchanged.
pub fn rotate_with_kicks(piece: &Tetromino, board: &Board, clockwise: bool) -> Option<Tetromino> {
    if piece.kind == PieceKind::O {
        return Some(*piece);
    }

    let rotated = piece.rotated(clockwise);
    kick_offsets(piece.kind, piece.rotation, rotated.rotation)
        .iter()
        .map(|&(dx, dy)| rotated.moved(dx, dy))
        .find(|candidate| !check_collision(candidate, board, None))
}
