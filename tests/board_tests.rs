//! Board tests - grid access, line clearing, word removal and gravity

use tui_wordtris::core::board::BoardCell;
use tui_wordtris::core::{check_collision, Board, Tetromino};
use tui_wordtris::types::{Cell, CellColor, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

fn block(letter: char) -> BoardCell {
    Some(Cell::filled(letter, CellColor::Orange))
}

fn fill_row(board: &mut Board, y: i8, letter: char) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, block(letter));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y}) should be empty");
        }
    }
}

#[test]
fn test_board_out_of_bounds_is_neutral() {
    let mut board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert_eq!(board.letter_at(BOARD_WIDTH as i8, 3), None);
    assert!(!board.set(-1, 0, block('А')));
    assert!(!board.is_occupied(0, -1));
}

#[test]
fn test_o_piece_in_corner_then_full_row_clears() {
    let mut board = Board::new();
    let piece = Tetromino::with_letters(PieceKind::O, ['Л', 'И', 'С', 'А'])
        .at(Position::new(0, 18));
    board.place_piece(&piece);

    assert!(board.find_completed_lines().is_empty());

    for x in 2..BOARD_WIDTH as i8 {
        board.set(x, 19, block('Н'));
    }
    assert_eq!(board.find_completed_lines().as_slice(), &[19]);

    let before = board.to_rows();
    assert_eq!(board.clear_lines(), 1);
    let after = board.to_rows();

    assert_eq!(after.len(), BOARD_HEIGHT as usize);
    assert!(after[0].iter().all(Option::is_none));
    // Every surviving row moved down by exactly one.
    for y in 0..19 {
        assert_eq!(after[y + 1], before[y]);
    }
    assert_eq!(board.letter_at(0, 19), Some('Л'));
    assert_eq!(board.letter_at(1, 19), Some('И'));
}

#[test]
fn test_clear_without_full_rows_is_noop() {
    let mut board = Board::new();
    board.set(4, 19, block('Щ'));
    board.set(4, 10, block('Э'));
    let before = board.clone();

    assert_eq!(board.clear_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_non_contiguous_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 19, 'А');
    board.set(3, 18, block('Б'));
    fill_row(&mut board, 17, 'В');
    board.set(6, 16, block('Г'));

    assert_eq!(board.clear_lines(), 2);
    assert_eq!(board.letter_at(3, 19), Some('Б'));
    assert_eq!(board.letter_at(6, 18), Some('Г'));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_kot_removed_in_scan_order() {
    let mut board = Board::new();
    board.set(0, 5, block('К'));
    board.set(1, 5, block('О'));
    board.set(3, 5, block('Т'));
    // Second 'О' further down is left alone.
    board.set(1, 19, block('О'));

    assert_eq!(board.remove_word_letters("КОТ"), 3);
    assert_eq!(board.filled_count(), 1);
    assert_eq!(board.letter_at(1, 19), Some('О'));
    assert_eq!(board.letter_at(0, 5), None);
    assert_eq!(board.letter_at(3, 5), None);
}

#[test]
fn test_remove_word_skips_missing_letters() {
    let mut board = Board::new();
    board.set(2, 19, block('Д'));
    board.set(3, 19, block('О'));

    assert_eq!(board.remove_word_letters("ДОМ"), 2);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_gravity_keeps_column_order() {
    let mut board = Board::new();
    board.set(7, 2, block('В'));
    board.set(7, 9, block('Е'));
    board.set(7, 15, block('Р'));
    board.set(7, 17, block('Х'));

    board.apply_gravity();

    assert_eq!(board.letter_at(7, 16), Some('В'));
    assert_eq!(board.letter_at(7, 17), Some('Е'));
    assert_eq!(board.letter_at(7, 18), Some('Р'));
    assert_eq!(board.letter_at(7, 19), Some('Х'));
    assert_eq!(board.filled_count(), 4);
}

#[test]
fn test_game_over_matches_spawn_collision() {
    let mut board = Board::new();
    for kind in PieceKind::ALL {
        let piece = Tetromino::with_letters(kind, ['А'; 4]);
        assert!(!board.check_game_over(&piece));
    }

    board.set(4, 1, block('Я'));
    for kind in PieceKind::ALL {
        let piece = Tetromino::with_letters(kind, ['А'; 4]);
        let spawn = tui_wordtris::core::pieces::spawn_position(kind);
        assert_eq!(
            board.check_game_over(&piece),
            check_collision(&piece, &board, Some(spawn)),
            "{kind:?}"
        );
    }
}
