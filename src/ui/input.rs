//! Terminal key decoding

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Key;

/// What the frontend should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Forward to the game
    Game(Key),
    /// Leave immediately (Ctrl+Q / Ctrl+C)
    ForceQuit,
}

/// Decode a crossterm key event. Releases and unknown keys yield `None`.
pub fn translate(key: KeyEvent) -> Option<InputAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(InputAction::ForceQuit),
            _ => None,
        };
    }

    let key = match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => return None,
    };
    Some(InputAction::Game(key))
}
