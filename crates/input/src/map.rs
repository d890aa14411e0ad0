//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Character bindings, matched case-insensitively.
///
/// Cyrillic entries sit on the same physical keys as their Latin
/// counterparts in the ЙЦУКЕН layout, so the game stays playable without
/// switching keyboard layouts.
pub const KEY_BINDINGS: &[(char, GameAction)] = &[
    ('a', GameAction::MoveLeft),
    ('ф', GameAction::MoveLeft),
    ('d', GameAction::MoveRight),
    ('в', GameAction::MoveRight),
    ('s', GameAction::SoftDrop),
    ('ы', GameAction::SoftDrop),
    ('w', GameAction::RotateCw),
    ('ц', GameAction::RotateCw),
    ('z', GameAction::RotateCcw),
    ('я', GameAction::RotateCcw),
    (' ', GameAction::HardDrop),
    ('c', GameAction::Hold),
    ('с', GameAction::Hold),
    ('p', GameAction::Pause),
    ('з', GameAction::Pause),
    ('r', GameAction::Restart),
    ('к', GameAction::Restart),
];

fn lookup(ch: char) -> Option<GameAction> {
    let ch = ch.to_lowercase().next().unwrap_or(ch);
    KEY_BINDINGS
        .iter()
        .find(|(key, _)| *key == ch)
        .map(|(_, action)| *action)
}

/// Map keyboard input to game actions.
///
/// Key releases and Ctrl/Alt chords map to nothing.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release
        || key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Char(ch) => lookup(ch),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            matches!(ch, 'c' | 'C')
        }
        KeyCode::Char(ch) => matches!(ch, 'q' | 'Q' | 'й' | 'Й'),
        _ => false,
    }
}

/// Esc abandons the word being traced.
pub fn is_trace_cancel(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::SoftDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('A'))),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(GameAction::MoveRight)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('W'))),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('z'))),
            Some(GameAction::RotateCcw)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('c'))),
            Some(GameAction::Hold)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('P'))),
            Some(GameAction::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(GameAction::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_cyrillic_layout() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('Ф'))),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('с'))),
            Some(GameAction::Hold)
        );
        assert!(should_quit(KeyEvent::from(KeyCode::Char('й'))));
    }

    #[test]
    fn test_ctrl_c_quits_instead_of_holding() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(should_quit(key));
        assert_eq!(handle_key_event(key), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!should_quit(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::CONTROL
        )));
    }

    #[test]
    fn test_escape_cancels_trace() {
        assert!(is_trace_cancel(KeyEvent::from(KeyCode::Esc)));
        assert!(!is_trace_cancel(KeyEvent::from(KeyCode::Char('q'))));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Esc)), None);
    }
}
