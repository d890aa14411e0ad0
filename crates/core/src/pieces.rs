//! Pieces module - lettered tetromino construction and rotation transforms
//!
//! Every piece is stored as a square matrix of [`Cell`]s inside a fixed 4x4
//! array. Only the top-left `size x size` corner is meaningful: 4 for I,
//! 2 for O and 3 for the rest. Rotating that bounding box around its centre
//! yields exactly the four SRS orientation states, so the kick tables in
//! [`crate::collision`] apply without per-kind shape tables.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::letters::LetterTable;
use crate::types::{Cell, PieceKind, Position, Rotation, BOARD_WIDTH, PIECE_GRID};

/// Cell matrix of a piece, indexed `[row][column]`.
pub type PieceGrid = [[Cell; PIECE_GRID]; PIECE_GRID];

/// Spawn-orientation occupancy, one entry per row of the bounding box.
fn template(kind: PieceKind) -> &'static [[u8; PIECE_GRID]] {
    match kind {
        PieceKind::I => &[[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
        PieceKind::O => &[[1, 1, 0, 0], [1, 1, 0, 0]],
        PieceKind::T => &[[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
        PieceKind::S => &[[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
        PieceKind::Z => &[[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        PieceKind::J => &[[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
        PieceKind::L => &[[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
    }
}

/// Side of the rotation bounding box for a kind.
pub fn bounding_size(kind: PieceKind) -> u8 {
    template(kind).len() as u8
}

/// Spawn position: horizontally centred, top row of the board.
pub fn spawn_position(kind: PieceKind) -> Position {
    let size = bounding_size(kind) as i8;
    Position::new((BOARD_WIDTH as i8 - size) / 2, 0)
}

/// Rotate the `size x size` corner clockwise (transpose, then reverse rows).
///
/// Only geometry changes: every cell keeps its letter, colour and blank flag.
pub fn rotate_cw(cells: &PieceGrid, size: u8) -> PieceGrid {
    let n = (size as usize).min(PIECE_GRID);
    let mut out = *cells;
    for r in 0..n {
        for c in 0..n {
            out[r][c] = cells[n - 1 - c][r];
        }
    }
    out
}

/// Rotate the `size x size` corner counter-clockwise.
pub fn rotate_ccw(cells: &PieceGrid, size: u8) -> PieceGrid {
    let n = (size as usize).min(PIECE_GRID);
    let mut out = *cells;
    for r in 0..n {
        for c in 0..n {
            out[r][c] = cells[c][n - 1 - r];
        }
    }
    out
}

/// A lettered tetromino.
///
/// `position` only means something for the active piece; `next` and `held`
/// pieces carry their spawn position until they are activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tetromino {
    pub kind: PieceKind,
    pub cells: PieceGrid,
    pub size: u8,
    pub position: Position,
    pub rotation: Rotation,
}

impl Tetromino {
    /// Create a piece of `kind`.
    ///
    /// Supplied letters fill the occupied cells in row-major order; any
    /// occupied cell left over gets a weighted random letter from `table`.
    pub fn create<R: Rng + ?Sized>(
        kind: PieceKind,
        letters: Option<&[char]>,
        rng: &mut R,
        table: &LetterTable,
    ) -> Self {
        let mut supplied = letters.unwrap_or(&[]).iter().copied();
        Self::build(kind, || supplied.next().unwrap_or_else(|| table.sample(&mut *rng)))
    }

    /// Create a piece with fixed letters and no randomness.
    pub fn with_letters(kind: PieceKind, letters: [char; 4]) -> Self {
        let mut supplied = letters.into_iter();
        Self::build(kind, || supplied.next().unwrap_or(' '))
    }

    /// Uniformly random kind with weighted random letters.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, table: &LetterTable) -> Self {
        let kind = PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())];
        Self::create(kind, None, rng, table)
    }

    fn build(kind: PieceKind, mut next_letter: impl FnMut() -> char) -> Self {
        let color = kind.color();
        let rows = template(kind);
        let mut cells = [[Cell::blank(color); PIECE_GRID]; PIECE_GRID];
        for (r, row) in rows.iter().enumerate() {
            for (c, &filled) in row.iter().enumerate() {
                if filled == 1 {
                    cells[r][c] = Cell::filled(next_letter(), color);
                }
            }
        }

        Self {
            kind,
            cells,
            size: rows.len() as u8,
            position: spawn_position(kind),
            rotation: Rotation::North,
        }
    }

    /// Occupied cells as `(dx, dy, cell)` offsets from the top-left corner.
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        let n = self.size as usize;
        self.cells[..n].iter().enumerate().flat_map(move |(r, row)| {
            row[..n]
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty)
                .map(move |(c, cell)| (c as i8, r as i8, *cell))
        })
    }

    /// Occupied cells in board coordinates when placed at `position`.
    pub fn cells_at(&self, position: Position) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        self.minos()
            .map(move |(dx, dy, cell)| (position.x + dx, position.y + dy, cell))
    }

    /// Occupied cells in board coordinates at the piece's own position.
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        self.cells_at(self.position)
    }

    /// Letters of the occupied cells in row-major order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.minos().filter_map(|(_, _, cell)| cell.letter())
    }

    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }

    pub fn at(&self, position: Position) -> Self {
        Self { position, ..*self }
    }

    /// Rotated in place (same position), orientation state updated.
    pub fn rotated(&self, clockwise: bool) -> Self {
        let (cells, rotation) = if clockwise {
            (rotate_cw(&self.cells, self.size), self.rotation.rotate_cw())
        } else {
            (rotate_ccw(&self.cells, self.size), self.rotation.rotate_ccw())
        };
        Self {
            cells,
            rotation,
            ..*self
        }
    }

    /// Back to spawn orientation and spawn position, letters kept.
    pub fn reset_to_spawn(&self) -> Self {
        let mut piece = *self;
        while piece.rotation != Rotation::North {
            piece = piece.rotated(false);
        }
        piece.at(spawn_position(piece.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(piece: &Tetromino) -> Vec<(i8, i8)> {
        piece.minos().map(|(x, y, _)| (x, y)).collect()
    }

    #[test]
    fn test_bounding_sizes() {
        assert_eq!(bounding_size(PieceKind::I), 4);
        assert_eq!(bounding_size(PieceKind::O), 2);
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(bounding_size(kind), 3);
        }
    }

    #[test]
    fn test_every_kind_has_four_minos() {
        for kind in PieceKind::ALL {
            let piece = Tetromino::with_letters(kind, ['А', 'Б', 'В', 'Г']);
            assert_eq!(piece.minos().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_spawn_positions_are_centred() {
        assert_eq!(spawn_position(PieceKind::I), Position::new(3, 0));
        assert_eq!(spawn_position(PieceKind::O), Position::new(4, 0));
        assert_eq!(spawn_position(PieceKind::T), Position::new(3, 0));
    }

    #[test]
    fn test_t_rotation_states() {
        let north = Tetromino::with_letters(PieceKind::T, ['А', 'Б', 'В', 'Г']);
        assert_eq!(offsets(&north), vec![(1, 0), (0, 1), (1, 1), (2, 1)]);

        let east = north.rotated(true);
        assert_eq!(east.rotation, Rotation::East);
        assert_eq!(offsets(&east), vec![(1, 0), (1, 1), (2, 1), (1, 2)]);

        let south = east.rotated(true);
        assert_eq!(offsets(&south), vec![(0, 1), (1, 1), (2, 1), (1, 2)]);

        let west = north.rotated(false);
        assert_eq!(west.rotation, Rotation::West);
        assert_eq!(offsets(&west), vec![(1, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_rotation_carries_letters() {
        let north = Tetromino::with_letters(PieceKind::I, ['А', 'Б', 'В', 'Г']);
        let east = north.rotated(true);

        let column: Vec<(i8, i8, Option<char>)> =
            east.minos().map(|(x, y, c)| (x, y, c.letter())).collect();
        assert_eq!(
            column,
            vec![
                (2, 0, Some('А')),
                (2, 1, Some('Б')),
                (2, 2, Some('В')),
                (2, 3, Some('Г')),
            ]
        );
    }

    #[test]
    fn test_cw_then_ccw_is_identity() {
        for kind in PieceKind::ALL {
            let piece = Tetromino::with_letters(kind, ['К', 'О', 'Т', 'Ы']);
            assert_eq!(rotate_ccw(&rotate_cw(&piece.cells, piece.size), piece.size), piece.cells);
        }
    }

    #[test]
    fn test_reset_to_spawn() {
        let piece = Tetromino::with_letters(PieceKind::L, ['А', 'Б', 'В', 'Г']);
        let moved = piece.rotated(true).rotated(true).moved(2, 7);
        assert_eq!(moved.reset_to_spawn(), piece);
    }

    #[test]
    fn test_create_uses_supplied_letters_then_samples() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(3);
        let piece = Tetromino::create(
            PieceKind::O,
            Some(&['Д', 'О']),
            &mut rng,
            &crate::letters::RUSSIAN,
        );
        let letters: Vec<char> = piece.letters().collect();
        assert_eq!(letters.len(), 4);
        assert_eq!(&letters[..2], &['Д', 'О']);
        assert!(letters[2..].iter().all(|&l| crate::letters::RUSSIAN.contains(l)));
    }
}
