//! Keyboard mapping for the terminal client.
//!
//! Bindings depend on the screen in control, so the same key can mean
//! "heal" in combat and "move left" on the map. Nothing outside this module
//! looks at `crossterm` key codes.

use crossterm::event::{KeyCode, KeyEvent};
use game_core::{CombatAction, DirectionKeys, Screen};

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Held direction on the map, folded into the next tick.
    Direction(DirectionKeys),
    /// Move the highlighted entry of a list.
    MenuUp,
    MenuDown,
    /// Accept the highlighted entry or dismiss the current screen.
    Confirm,
    Back,
    Combat(CombatAction),
    /// Pick a numbered loot offer (zero-based).
    TakeLoot(usize),
    None,
}

/// Converts a raw key event into a higher-level command for `screen`.
pub fn map_key(key: KeyEvent, screen: Screen) -> KeyAction {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
        return KeyAction::Quit;
    }

    match screen {
        Screen::Title => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Confirm,
            _ => KeyAction::None,
        },
        Screen::LevelSelect => match key.code {
            KeyCode::Up | KeyCode::Char('k') => KeyAction::MenuUp,
            KeyCode::Down | KeyCode::Char('j') => KeyAction::MenuDown,
            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Backspace | KeyCode::Left => KeyAction::Back,
            _ => KeyAction::None,
        },
        Screen::Map => direction(key.code).map_or(KeyAction::None, KeyAction::Direction),
        Screen::Combat => match key.code {
            KeyCode::Char('a') | KeyCode::Char('1') => KeyAction::Combat(CombatAction::Attack),
            KeyCode::Char('h') | KeyCode::Char('2') => KeyAction::Combat(CombatAction::Heal),
            KeyCode::Char('r') | KeyCode::Char('3') => KeyAction::Combat(CombatAction::Flee),
            _ => KeyAction::None,
        },
        Screen::Loot => match key.code {
            KeyCode::Char(digit @ '1'..='9') => {
                KeyAction::TakeLoot(digit as usize - '1' as usize)
            }
            KeyCode::Enter | KeyCode::Char('d') => KeyAction::Confirm,
            _ => KeyAction::None,
        },
        Screen::RunEnded(_) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Confirm,
            _ => KeyAction::None,
        },
        Screen::Exit => KeyAction::None,
    }
}

fn direction(code: KeyCode) -> Option<DirectionKeys> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(DirectionKeys::UP),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(DirectionKeys::DOWN),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(DirectionKeys::LEFT),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(DirectionKeys::RIGHT),
        _ => None,
    }
}
