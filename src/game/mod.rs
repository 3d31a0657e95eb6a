//! Game state: snapshots from the server, the selection store, and the
//! activity log.

mod log;
mod snapshot;
mod store;

pub use log::{ActivityLog, LogEntry, LogOrigin};
pub use snapshot::{GameResult, GameSnapshot, LegalMove, MoveId, MoveSubmission};
pub use store::{GameStateStore, SelectionState};
