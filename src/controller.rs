//! The turn-sequencing controller.
//!
//! One controller task owns the snapshot store and the activity log, takes
//! [`Command`]s from the UI over a channel, and pushes [`GameEvent`]s back.
//! A human turn is a strictly ordered sequence: submit the human move,
//! inspect the returned snapshot's result, and only then (and only if the
//! game is still live) query the engine and submit its reply. The three
//! network awaits are the only suspension points.

use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument, warn};

use crate::board::{Piece, geometry};
use crate::client::GameService;
use crate::engine::EngineSelection;
use crate::error::ClientError;
use crate::game::{
    ActivityLog, GameResult, GameSnapshot, GameStateStore, LogEntry, LogOrigin, MoveSubmission,
    SelectionState,
};

/// Pause after the human move lands, so the player sees it before the
/// engine replies. Perceptual only.
const HUMAN_MOVE_PAUSE: Duration = Duration::from_millis(200);
/// Pause before the engine's move is shown.
const AI_MOVE_PAUSE: Duration = Duration::from_millis(400);

/// Where the controller is inside a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the first click of a selection.
    Idle,
    /// An origin square is selected.
    Selected,
    /// The human move has been submitted and its round-trip is pending.
    HumanMoveInFlight,
    /// The best-move query is pending.
    AiMoveRequested,
    /// The engine's move has been submitted and its round-trip is pending.
    AiMoveInFlight,
    /// The game has a terminal result. Only a new game or an undo leaves
    /// this phase.
    GameOver,
}

/// Requests the UI sends to the controller task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A square was clicked.
    Click(usize),
    /// Start a fresh game.
    NewGame,
    /// Retract the last move.
    Undo,
}

/// Notifications the controller pushes to observers.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// The authoritative snapshot was replaced.
    SnapshotReplaced(GameSnapshot),
    /// The selection changed (possibly to nothing).
    SelectionChanged(Option<SelectionState>),
    /// An entry was prepended to the activity log.
    LogAppended(LogEntry),
    /// A new game replaced the log wholesale.
    LogCleared,
    /// The engine started or stopped thinking.
    AiThinking(bool),
    /// The game reached a terminal result.
    GameEnded(GameResult),
    /// An interaction failed; the message is for display.
    Error(String),
}

/// Drives square selection, move submission, and the engine reply for one
/// game session.
pub struct MoveController {
    service: Box<dyn GameService>,
    engine: EngineSelection,
    store: GameStateStore,
    log: ActivityLog,
    phase: TurnPhase,
    thinking: bool,
    /// Bumped on every new game; responses stamped with an older value are
    /// dropped instead of resolving against a replaced snapshot.
    generation: u64,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl MoveController {
    /// Creates a controller over a gateway and an engine selection.
    pub fn new(
        service: Box<dyn GameService>,
        engine: EngineSelection,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        info!(engine = %engine.kind, "Creating move controller");
        Self {
            service,
            engine,
            store: GameStateStore::new(),
            log: ActivityLog::new(),
            phase: TurnPhase::Idle,
            thinking: false,
            generation: 0,
            event_tx,
        }
    }

    /// Current phase of the turn state machine.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Whether a best-move query or engine move submission is pending.
    pub fn thinking(&self) -> bool {
        self.thinking
    }

    /// The snapshot/selection store.
    pub fn store(&self) -> &GameStateStore {
        &self.store
    }

    /// The activity log.
    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Changes the engine used for subsequent turns.
    pub fn set_engine(&mut self, engine: EngineSelection) {
        info!(engine = %engine.kind, "Switching engine");
        self.engine = engine;
    }

    /// Processes commands until the channel closes. Failed interactions are
    /// reported as [`GameEvent::Error`] and do not end the loop.
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        info!("Controller loop started");
        while let Some(command) = commands.recv().await {
            let outcome = match command {
                Command::Click(square) => self.handle_click(square).await,
                Command::NewGame => self.new_game().await,
                Command::Undo => self.undo().await,
            };
            if let Err(e) = outcome {
                error!(error = %e, ?command, "Interaction failed");
                self.emit(GameEvent::Error(e.to_string()));
            }
        }
        info!("Controller loop finished");
    }

    /// Handles a click on a board square.
    ///
    /// In `Idle` any square may be selected, including empty and
    /// opponent-owned ones; an origin with no legal moves simply gets an
    /// empty destination set. In `Selected`, clicking the origin deselects,
    /// clicking a listed destination plays the turn, and anything else
    /// re-selects. Clicks in other phases are ignored.
    #[instrument(skip(self))]
    pub async fn handle_click(&mut self, square: usize) -> Result<(), ClientError> {
        if square >= geometry::NUM_SQUARES || self.store.snapshot().is_none() {
            return Ok(());
        }
        match self.phase {
            TurnPhase::Idle => {
                self.select(square);
                Ok(())
            }
            TurnPhase::Selected => {
                let selection = match self.store.selection() {
                    Some(s) => s.clone(),
                    None => {
                        // Phase and store disagree; recover by selecting.
                        warn!("Selected phase without a stored selection");
                        self.select(square);
                        return Ok(());
                    }
                };
                if square == selection.origin {
                    debug!("Deselecting origin");
                    self.store.clear_selection();
                    self.phase = TurnPhase::Idle;
                    self.emit(GameEvent::SelectionChanged(None));
                    Ok(())
                } else if selection.destinations.contains(&square) {
                    self.play_turn(selection.origin, square).await
                } else {
                    self.select(square);
                    Ok(())
                }
            }
            TurnPhase::HumanMoveInFlight
            | TurnPhase::AiMoveRequested
            | TurnPhase::AiMoveInFlight
            | TurnPhase::GameOver => {
                debug!(phase = ?self.phase, "Ignoring click");
                Ok(())
            }
        }
    }

    /// Creates a fresh game: new snapshot, fresh log, `Idle` phase. Bumps
    /// the session generation so stale in-flight responses are dropped.
    #[instrument(skip(self))]
    pub async fn new_game(&mut self) -> Result<(), ClientError> {
        self.generation += 1;
        let snapshot = self.service.create_game().await?;

        self.store.reset();
        self.log = ActivityLog::new();
        self.emit(GameEvent::LogCleared);
        self.emit(GameEvent::SelectionChanged(None));
        self.replace_snapshot(snapshot);
        self.append_log(LogOrigin::System, "新建对局");
        self.phase = TurnPhase::Idle;
        self.set_thinking(false);
        Ok(())
    }

    /// Retracts the last move. A rejection at the initial position is
    /// downgraded to a system log entry; transport failures propagate.
    #[instrument(skip(self))]
    pub async fn undo(&mut self) -> Result<(), ClientError> {
        let Some(game_id) = self.game_id() else {
            return Ok(());
        };
        match self.service.undo(&game_id).await {
            Ok(snapshot) => {
                self.store.clear_selection();
                self.emit(GameEvent::SelectionChanged(None));
                self.replace_snapshot(snapshot);
                self.phase = TurnPhase::Idle;
                self.set_thinking(false);
                Ok(())
            }
            Err(e) if e.is_validation() => {
                info!("Undo rejected at initial position");
                self.append_log(LogOrigin::System, "已到初始局面，无法继续悔棋");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Plays one full turn: human move, result inspection, and the engine
    /// reply if the game is still live.
    ///
    /// The two half-moves are not atomic: once the human submission has
    /// succeeded it stays committed even if the engine query or submission
    /// fails afterwards. Nothing here is retried.
    #[instrument(skip(self))]
    async fn play_turn(&mut self, origin: usize, dest: usize) -> Result<(), ClientError> {
        let generation = self.generation;
        let Some(pre_move) = self.store.snapshot().cloned() else {
            return Ok(());
        };
        let game_id = pre_move.game_id.clone();

        // Mover and capture identity come from the board as it was before
        // the move; the post-move snapshot no longer has them in place.
        let mover = pre_move.piece_at(origin);
        let captured = pre_move.piece_at(dest);

        self.phase = TurnPhase::HumanMoveInFlight;
        let submission = MoveSubmission::Coords {
            from_sq: origin,
            to_sq: dest,
        };
        let after_human = match self.service.submit_move(&game_id, submission).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Nothing was applied; the selection stays live.
                self.phase = TurnPhase::Selected;
                return Err(e);
            }
        };
        if self.stale(generation) {
            return Ok(());
        }

        let description = describe_move(mover, captured, origin, dest);
        self.append_log(LogOrigin::Human, format!("你: {description}"));
        self.store.clear_selection();
        self.emit(GameEvent::SelectionChanged(None));
        self.replace_snapshot(after_human.clone());

        sleep(HUMAN_MOVE_PAUSE).await;

        if let Some(result) = after_human.result {
            self.finish(result);
            return Ok(());
        }

        self.phase = TurnPhase::AiMoveRequested;
        self.set_thinking(true);
        let best = match self.service.best_move(&game_id, &self.engine).await {
            Ok(best) => best,
            Err(e) => {
                self.set_thinking(false);
                self.phase = TurnPhase::Idle;
                return Err(e);
            }
        };
        if self.stale(generation) {
            return Ok(());
        }

        let Some(best) = best else {
            debug!("Engine returned no move");
            self.set_thinking(false);
            self.phase = TurnPhase::Idle;
            return Ok(());
        };

        let mover = after_human.piece_at(best.from);
        let captured = after_human.piece_at(best.to);

        self.phase = TurnPhase::AiMoveInFlight;
        let token = MoveSubmission::Token {
            move_id: best.move_id,
        };
        let after_ai = match self.service.submit_move(&game_id, token).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.set_thinking(false);
                self.phase = TurnPhase::Idle;
                return Err(e);
            }
        };
        if self.stale(generation) {
            return Ok(());
        }

        sleep(AI_MOVE_PAUSE).await;

        self.replace_snapshot(after_ai.clone());
        let description = describe_move(mover, captured, best.from, best.to);
        self.append_log(LogOrigin::Ai, format!("AI: {description}"));
        self.set_thinking(false);

        if let Some(result) = after_ai.result {
            self.finish(result);
        } else {
            self.phase = TurnPhase::Idle;
        }
        Ok(())
    }

    fn select(&mut self, square: usize) {
        self.store.select(square);
        self.phase = TurnPhase::Selected;
        self.emit(GameEvent::SelectionChanged(self.store.selection().cloned()));
    }

    fn finish(&mut self, result: GameResult) {
        info!(result = ?result, "Game over");
        self.append_log(LogOrigin::System, format!("对局结束: {}", result.label()));
        self.set_thinking(false);
        self.phase = TurnPhase::GameOver;
        self.emit(GameEvent::GameEnded(result));
    }

    fn replace_snapshot(&mut self, snapshot: GameSnapshot) {
        self.store.replace_snapshot(snapshot.clone());
        self.emit(GameEvent::SnapshotReplaced(snapshot));
    }

    fn append_log(&mut self, origin: LogOrigin, message: impl Into<String>) {
        self.log.push(origin, message);
        if let Some(entry) = self.log.entries().first() {
            self.emit(GameEvent::LogAppended(entry.clone()));
        }
    }

    fn set_thinking(&mut self, thinking: bool) {
        if self.thinking != thinking {
            self.thinking = thinking;
            self.emit(GameEvent::AiThinking(thinking));
        }
    }

    fn stale(&self, generation: u64) -> bool {
        if self.generation != generation {
            warn!(
                started = generation,
                current = self.generation,
                "Dropping response from a superseded game"
            );
            return true;
        }
        false
    }

    fn game_id(&self) -> Option<String> {
        self.store.snapshot().map(|s| s.game_id.clone())
    }

    fn emit(&self, event: GameEvent) {
        // The UI side may already be gone during shutdown.
        let _ = self.event_tx.send(event);
    }
}

/// Formats a move for the activity log: piece name, origin and destination
/// coordinates, and a capture annotation when the destination was occupied.
fn describe_move(
    mover: Option<Piece>,
    captured: Option<Piece>,
    from: usize,
    to: usize,
) -> String {
    let name = mover.map(|p| p.name()).unwrap_or("?");
    let mut text = format!(
        "{} {}→{}",
        name,
        geometry::coord(from),
        geometry::coord(to)
    );
    if let Some(captured) = captured {
        text.push_str(&format!(" (吃{})", captured.name()));
    }
    text
}
