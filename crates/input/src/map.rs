//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Plain movement keys walk the cursor; the same key shifted (or its
/// uppercase letter) swaps the cursor cell toward that direction.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        // Movement / shifted swap
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => {
            Some(cursor_or_swap(Direction::Left, shifted))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            Some(cursor_or_swap(Direction::Right, shifted))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => {
            Some(cursor_or_swap(Direction::Up, shifted))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
            Some(cursor_or_swap(Direction::Down, shifted))
        }
        KeyCode::Char('H') | KeyCode::Char('A') => Some(GameAction::SwapToward(Direction::Left)),
        KeyCode::Char('L') | KeyCode::Char('D') => Some(GameAction::SwapToward(Direction::Right)),
        KeyCode::Char('K') | KeyCode::Char('W') => Some(GameAction::SwapToward(Direction::Up)),
        KeyCode::Char('J') | KeyCode::Char('S') => Some(GameAction::SwapToward(Direction::Down)),

        // Actions
        KeyCode::Enter => Some(GameAction::Start),
        KeyCode::Char(' ') => Some(GameAction::Grab),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

fn cursor_or_swap(dir: Direction, shifted: bool) -> GameAction {
    if shifted {
        GameAction::SwapToward(dir)
    } else {
        GameAction::MoveCursor(dir)
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
