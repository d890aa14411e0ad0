//! Snapshot persistence tests (serde_json round trips and restore validation)

use tui_wordtris::core::{GameConfig, GameSnapshot, GameState, SnapshotError};
use tui_wordtris::types::{Cell, CellColor, GameAction};

fn played_game() -> GameState {
    let mut state = GameState::with_seed(8080);
    state.start();
    state.apply_action(GameAction::MoveLeft);
    state.apply_action(GameAction::HardDrop);
    state.apply_action(GameAction::Hold);
    state.apply_action(GameAction::RotateCw);
    state
}

#[test]
fn test_json_restore_resumes_same_game() {
    let state = played_game();
    let json = serde_json::to_string(&state.snapshot()).unwrap();

    let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
    let restored = GameState::restore(&snapshot, GameConfig::default()).unwrap();

    assert_eq!(restored.snapshot(), state.snapshot());
    assert_eq!(restored.board(), state.board());
    assert_eq!(restored.held(), state.held());
    assert!(!restored.can_hold());
}

#[test]
fn test_letters_survive_json() {
    let mut state = played_game();
    state
        .board_mut()
        .set(0, 19, Some(Cell::filled('Ё', CellColor::Purple)));
    let json = serde_json::to_string(&state.snapshot()).unwrap();
    assert!(json.contains('Ё'));

    let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
    let restored = GameState::restore(&snapshot, GameConfig::default()).unwrap();
    assert_eq!(restored.board().letter_at(0, 19), Some('Ё'));
}

#[test]
fn test_restore_spawns_when_no_active_piece() {
    let state = played_game();
    let mut snapshot = state.snapshot();
    snapshot.active = None;

    let restored = GameState::restore(&snapshot, GameConfig::default()).unwrap();
    assert!(restored.active().is_some());
    assert!(restored.started());
}

#[test]
fn test_restore_rejects_overlapping_active_piece() {
    let state = played_game();
    let mut snapshot = state.snapshot();
    let active = snapshot.active.unwrap();
    let (x, y, _) = active.board_cells().next().unwrap();
    snapshot.board[y as usize][x as usize] = Some(Cell::filled('Ж', CellColor::Red));

    assert_eq!(
        GameState::restore(&snapshot, GameConfig::default()).unwrap_err(),
        SnapshotError::ActiveOverlaps
    );
}

#[test]
fn test_restore_rejects_bad_dimensions() {
    let state = played_game();

    let mut snapshot = state.snapshot();
    snapshot.board[7].push(None);
    assert_eq!(
        GameState::restore(&snapshot, GameConfig::default()).unwrap_err(),
        SnapshotError::RowWidth {
            row: 7,
            found: 11,
            expected: 10
        }
    );

    let mut snapshot = state.snapshot();
    snapshot.speed_ms = 0;
    assert_eq!(
        GameState::restore(&snapshot, GameConfig::default()).unwrap_err(),
        SnapshotError::ZeroSpeed
    );
}

#[test]
fn test_restore_rejects_oversized_piece_box() {
    let state = played_game();

    let mut snapshot = state.snapshot();
    if let Some(active) = snapshot.active.as_mut() {
        active.size = 9;
    }
    assert_eq!(
        GameState::restore(&snapshot, GameConfig::default()).unwrap_err(),
        SnapshotError::InvalidPiece { slot: "active" }
    );

    let mut snapshot = state.snapshot();
    snapshot.next.size = 200;
    assert_eq!(
        GameState::restore(&snapshot, GameConfig::default()).unwrap_err(),
        SnapshotError::InvalidPiece { slot: "next" }
    );
}

#[test]
fn test_restore_rejects_wrong_cell_count() {
    let state = played_game();
    let mut snapshot = state.snapshot();
    let mut held = snapshot.held.unwrap();
    held.cells[3][3] = Cell::filled('Щ', CellColor::Cyan);
    snapshot.held = Some(held);

    assert_eq!(
        GameState::restore(&snapshot, GameConfig::default()).unwrap_err(),
        SnapshotError::InvalidPiece { slot: "held" }
    );
}

#[test]
fn test_restore_rejects_active_piece_after_game_over() {
    let state = played_game();
    let mut snapshot = state.snapshot();
    snapshot.game_over = true;
    assert!(snapshot.active.is_some());

    assert_eq!(
        GameState::restore(&snapshot, GameConfig::default()).unwrap_err(),
        SnapshotError::ActiveAfterGameOver
    );

    snapshot.active = None;
    let restored = GameState::restore(&snapshot, GameConfig::default()).unwrap();
    assert!(restored.game_over());
    assert!(restored.active().is_none());
}

#[test]
fn test_malformed_json_is_an_error() {
    assert!(serde_json::from_str::<GameSnapshot>("{\"board\": 3}").is_err());
}
