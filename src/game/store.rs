//! Holder for the latest snapshot plus the derived selection state.

use tracing::{debug, instrument};

use super::snapshot::GameSnapshot;

/// An active selection: the clicked origin square and the destinations it
/// could legally move to, as computed from the snapshot that was live when
/// the selection was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// The selected origin square.
    pub origin: usize,
    /// Destinations of legal moves from the origin. Empty when the origin
    /// has no legal moves (empty or opponent squares may still be selected).
    pub destinations: Vec<usize>,
}

/// Owns the latest authoritative snapshot and the selection derived from it.
///
/// The destination set is computed once, at [`GameStateStore::select`] time,
/// and deliberately not revalidated when the snapshot is later replaced;
/// resolution of a selection always goes through the controller, which
/// clears it on every snapshot-changing path.
#[derive(Debug, Default)]
pub struct GameStateStore {
    snapshot: Option<GameSnapshot>,
    selection: Option<SelectionState>,
}

impl GameStateStore {
    /// Creates an empty store with no game loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, if a game is loaded.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    /// The active selection, if any.
    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    /// Unconditionally replaces the snapshot. The selection is untouched.
    #[instrument(skip_all, fields(game_id = %snapshot.game_id))]
    pub fn replace_snapshot(&mut self, snapshot: GameSnapshot) {
        debug!(
            side_to_move = snapshot.side_to_move,
            legal = snapshot.legal_moves.len(),
            result = ?snapshot.result,
            "Replacing snapshot"
        );
        self.snapshot = Some(snapshot);
    }

    /// Selects `origin`, recomputing the destination set from the snapshot
    /// as it stands right now. Any square may be selected; origins with no
    /// legal moves get an empty destination set.
    #[instrument(skip(self))]
    pub fn select(&mut self, origin: usize) {
        let destinations = self
            .snapshot
            .as_ref()
            .map(|s| s.destinations_from(origin))
            .unwrap_or_default();
        debug!(destinations = destinations.len(), "Selected square");
        self.selection = Some(SelectionState {
            origin,
            destinations,
        });
    }

    /// Discards the origin and destination set.
    #[instrument(skip(self))]
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Drops all state, as on navigation to a fresh game before the create
    /// call resolves.
    pub fn reset(&mut self) {
        self.snapshot = None;
        self.selection = None;
    }
}
