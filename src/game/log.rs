//! Append-only activity log shown next to the board.

use tracing::debug;

/// Who produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOrigin {
    /// Session-level events: new game, terminal results, failed undo.
    System,
    /// The human player's moves.
    Human,
    /// The AI opponent's moves.
    Ai,
}

/// One immutable entry in the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Source of the entry.
    pub origin: LogOrigin,
    /// Display text, already formatted.
    pub message: String,
}

/// Ordered record of game events, newest first.
///
/// Entries are never deduplicated, capped, or persisted; a new game starts
/// a fresh log by replacing the owning state wholesale.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an entry.
    pub fn push(&mut self, origin: LogOrigin, message: impl Into<String>) {
        let entry = LogEntry {
            origin,
            message: message.into(),
        };
        debug!(origin = ?entry.origin, message = %entry.message, "Log entry");
        self.entries.insert(0, entry);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
