//! Keyboard mapping for the play screen.

use crossterm::event::KeyCode;

use crate::board::geometry::{FILES, RANKS};

/// A direction the board cursor can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Up one screen row.
    Up,
    /// Down one screen row.
    Down,
    /// Left one file.
    Left,
    /// Right one file.
    Right,
}

/// What a key press asks the UI to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the board cursor.
    MoveCursor(Direction),
    /// Click the square under the cursor.
    Click,
    /// Start a new game.
    NewGame,
    /// Retract the last move.
    Undo,
    /// Flip the display orientation.
    Flip,
    /// Leave the TUI.
    Quit,
}

/// Maps a key to an action, if it has one.
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveCursor(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveCursor(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveCursor(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveCursor(Direction::Right)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Click),
        KeyCode::Char('n') => Some(Action::NewGame),
        KeyCode::Char('u') => Some(Action::Undo),
        KeyCode::Char('f') => Some(Action::Flip),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Moves a (screen row, file) cursor one step, clamped to the board.
pub fn step(row: usize, col: usize, direction: Direction) -> (usize, usize) {
    match direction {
        Direction::Up => (row.saturating_sub(1), col),
        Direction::Down => ((row + 1).min(RANKS - 1), col),
        Direction::Left => (row, col.saturating_sub(1)),
        Direction::Right => (row, (col + 1).min(FILES - 1)),
    }
}
