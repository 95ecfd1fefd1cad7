use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A logical command decoded from a key press
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Turn(Direction),
    Pause,
    Start,
    Enter,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => {
                Some(Command::Turn(Direction::Up))
            }
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => {
                Some(Command::Turn(Direction::Down))
            }
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => {
                Some(Command::Turn(Direction::Left))
            }
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => {
                Some(Command::Turn(Direction::Right))
            }
            (KeyModifiers::NONE, KeyCode::Char(' ' | 'p')) => Some(Command::Pause),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::Start),
            (_, KeyCode::Enter) => Some(Command::Enter),
            _ => None,
        }
    }
}
