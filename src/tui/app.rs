//! View model the TUI renders from, fed by controller events.

use tracing::debug;

use crate::board::geometry;
use crate::controller::GameEvent;
use crate::game::{GameResult, GameSnapshot, LogEntry, SelectionState};

use super::input::{self, Direction};

/// Everything the play screen needs to draw a frame. Updated only by
/// [`App::apply_event`] and local cursor movement; the authoritative state
/// stays with the controller task.
pub struct App {
    snapshot: Option<GameSnapshot>,
    selection: Option<SelectionState>,
    log: Vec<LogEntry>,
    thinking: bool,
    result: Option<GameResult>,
    error: Option<String>,
    cursor_row: usize,
    cursor_col: usize,
    flipped: bool,
}

impl App {
    /// Creates the view model, with the cursor on the bottom rank.
    pub fn new(flipped: bool) -> Self {
        Self {
            snapshot: None,
            selection: None,
            log: Vec::new(),
            thinking: false,
            result: None,
            error: None,
            cursor_row: geometry::RANKS - 1,
            cursor_col: geometry::FILES / 2,
            flipped,
        }
    }

    /// Latest snapshot seen, if any.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    /// Latest selection seen, if any.
    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    /// Log entries, newest first.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Whether the engine is thinking.
    pub fn thinking(&self) -> bool {
        self.thinking
    }

    /// Terminal result, once the game ended.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Last interaction error, if one is being shown.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current display orientation.
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Cursor position as (screen row, file).
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Board index under the cursor, respecting the flip flag.
    pub fn cursor_index(&self) -> usize {
        geometry::display_index(self.cursor_row, self.cursor_col, self.flipped)
    }

    /// Folds a controller event into the view model.
    pub fn apply_event(&mut self, event: GameEvent) {
        debug!(event = ?event, "Applying event");
        match event {
            GameEvent::SnapshotReplaced(snapshot) => {
                self.result = snapshot.result;
                self.snapshot = Some(snapshot);
            }
            GameEvent::SelectionChanged(selection) => self.selection = selection,
            GameEvent::LogAppended(entry) => self.log.insert(0, entry),
            GameEvent::LogCleared => {
                self.log.clear();
                self.result = None;
                self.error = None;
            }
            GameEvent::AiThinking(thinking) => self.thinking = thinking,
            GameEvent::GameEnded(result) => self.result = Some(result),
            GameEvent::Error(message) => self.error = Some(message),
        }
    }

    /// Moves the cursor one step, clamped to the board.
    pub fn move_cursor(&mut self, direction: Direction) {
        let (row, col) = input::step(self.cursor_row, self.cursor_col, direction);
        self.cursor_row = row;
        self.cursor_col = col;
    }

    /// Flips the display orientation. The cursor stays on the same screen
    /// cell, so it now points at the mirrored square.
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }
}
