//! Mouse mapping from terminal events to board-space pointer events.

use crate::types::{BoardLayout, PointerEvent};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Translate a mouse event using where the board was last drawn.
///
/// Left press and left drag become `Down`/`Move` on the cell under the
/// cursor; samples outside the board are dropped. Releasing the left button
/// anywhere ends the trace, and a right click cancels it.
pub fn map_mouse_event(event: MouseEvent, layout: &BoardLayout) -> Option<PointerEvent> {
    let cell = layout.to_grid(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => cell.map(|(x, y)| PointerEvent::Down { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => cell.map(|(x, y)| PointerEvent::Move { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up),
        MouseEventKind::Down(MouseButton::Right) => Some(PointerEvent::Cancel),
        _ => None,
    }
}
