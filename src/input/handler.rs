use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                KeyAction::Move(Direction::Up)
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                KeyAction::Move(Direction::Down)
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                KeyAction::Move(Direction::Left)
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                KeyAction::Move(Direction::Right)
            }

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
