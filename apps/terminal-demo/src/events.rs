//! crossterm events to codefield events.

use codefield_graphics::Point;
use codefield_ui::{KeyCode, KeyEvent, KeyEventType, Modifiers, PointerEvent, PointerEventKind};
use crossterm::event::{
    self as term, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// What the demo loop should do with a terminal key press.
#[derive(Debug, PartialEq)]
pub enum KeyAction {
    /// Hand the event to the field.
    Forward(KeyEvent),
    /// Escape: blur if focused, otherwise leave.
    Dismiss,
    Quit,
    Ignore,
}

pub fn map_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.contains(KeyModifiers::SHIFT),
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}

pub fn map_key(event: &term::KeyEvent) -> KeyAction {
    if event.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    if event.code == term::KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    let (key_code, text) = match event.code {
        term::KeyCode::Char(ch) => (KeyCode::Character, ch.to_string()),
        term::KeyCode::Backspace => (KeyCode::Backspace, String::new()),
        term::KeyCode::Delete => (KeyCode::Delete, String::new()),
        term::KeyCode::Enter => (KeyCode::Enter, String::new()),
        term::KeyCode::Tab => (KeyCode::Tab, String::new()),
        term::KeyCode::Left => (KeyCode::ArrowLeft, String::new()),
        term::KeyCode::Right => (KeyCode::ArrowRight, String::new()),
        term::KeyCode::Home => (KeyCode::Home, String::new()),
        term::KeyCode::End => (KeyCode::End, String::new()),
        term::KeyCode::Esc => return KeyAction::Dismiss,
        _ => (KeyCode::Unknown, String::new()),
    };

    KeyAction::Forward(KeyEvent::new(
        key_code,
        text,
        map_modifiers(event.modifiers),
        KeyEventType::KeyDown,
    ))
}

/// Mouse presses relative to the field's top-left cell.
pub fn map_mouse(event: &term::MouseEvent, origin: (u16, u16)) -> Option<PointerEvent> {
    let kind = match event.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerEventKind::Down,
        MouseEventKind::Up(MouseButton::Left) => PointerEventKind::Up,
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerEventKind::Move,
        _ => return None,
    };
    // Cell centers, so a click on the first column lands inside the bounds.
    let x = f32::from(event.column) - f32::from(origin.0) + 0.5;
    let y = f32::from(event.row) - f32::from(origin.1) + 0.5;
    Some(PointerEvent::new(kind, Point::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn press(code: term::KeyCode, modifiers: KeyModifiers) -> term::KeyEvent {
        term::KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn characters_forward_as_text() {
        let action = map_key(&press(term::KeyCode::Char('7'), KeyModifiers::NONE));
        assert_eq!(action, KeyAction::Forward(KeyEvent::character("7")));
    }

    #[test]
    fn ctrl_c_quits_and_escape_dismisses() {
        assert_eq!(
            map_key(&press(term::KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(
            map_key(&press(term::KeyCode::Esc, KeyModifiers::NONE)),
            KeyAction::Dismiss
        );
    }

    #[test]
    fn ctrl_shortcuts_keep_modifiers() {
        let KeyAction::Forward(event) =
            map_key(&press(term::KeyCode::Char('v'), KeyModifiers::CONTROL))
        else {
            panic!("expected forwarded key");
        };
        assert!(event.modifiers.ctrl);
    }

    #[test]
    fn mouse_is_relative_to_origin() {
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        let pointer = map_mouse(&event, (10, 3)).expect("left press maps");
        assert_eq!(pointer, PointerEvent::down(2.5, 1.5));
    }
}
