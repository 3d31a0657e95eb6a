//! Tests for the turn-sequencing controller, driven against a scripted
//! gateway so every network outcome is under test control.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use xiangqi_client::game::{GameResult, GameSnapshot, LegalMove, MoveSubmission};
use xiangqi_client::{
    ArenaReport, ArenaRequest, ClientError, EngineSelection, GameEvent, GameService,
    MoveController, TurnPhase,
};

#[derive(Default)]
struct Inner {
    creates: Mutex<VecDeque<Result<GameSnapshot, ClientError>>>,
    submits: Mutex<VecDeque<Result<GameSnapshot, ClientError>>>,
    bests: Mutex<VecDeque<Result<Option<LegalMove>, ClientError>>>,
    undos: Mutex<VecDeque<Result<GameSnapshot, ClientError>>>,
    submissions: Mutex<Vec<MoveSubmission>>,
    best_calls: AtomicUsize,
}

/// Gateway whose responses are queued up front by the test.
#[derive(Clone, Default)]
struct Scripted(Arc<Inner>);

impl Scripted {
    fn on_create(&self, result: Result<GameSnapshot, ClientError>) {
        self.0.creates.lock().unwrap().push_back(result);
    }

    fn on_submit(&self, result: Result<GameSnapshot, ClientError>) {
        self.0.submits.lock().unwrap().push_back(result);
    }

    fn on_best(&self, result: Result<Option<LegalMove>, ClientError>) {
        self.0.bests.lock().unwrap().push_back(result);
    }

    fn on_undo(&self, result: Result<GameSnapshot, ClientError>) {
        self.0.undos.lock().unwrap().push_back(result);
    }

    fn submissions(&self) -> Vec<MoveSubmission> {
        self.0.submissions.lock().unwrap().clone()
    }

    fn best_calls(&self) -> usize {
        self.0.best_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameService for Scripted {
    async fn create_game(&self) -> Result<GameSnapshot, ClientError> {
        self.0
            .creates
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected create_game call")
    }

    async fn fetch_game(&self, _game_id: &str) -> Result<GameSnapshot, ClientError> {
        unimplemented!("fetch_game is not scripted")
    }

    async fn submit_move(
        &self,
        _game_id: &str,
        submission: MoveSubmission,
    ) -> Result<GameSnapshot, ClientError> {
        self.0.submissions.lock().unwrap().push(submission);
        self.0
            .submits
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected submit_move call")
    }

    async fn best_move(
        &self,
        _game_id: &str,
        _engine: &EngineSelection,
    ) -> Result<Option<LegalMove>, ClientError> {
        self.0.best_calls.fetch_add(1, Ordering::SeqCst);
        self.0
            .bests
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected best_move call")
    }

    async fn undo(&self, _game_id: &str) -> Result<GameSnapshot, ClientError> {
        self.0
            .undos
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected undo call")
    }

    async fn run_arena(&self, _request: &ArenaRequest) -> Result<ArenaReport, ClientError> {
        unimplemented!("run_arena is not scripted")
    }
}

fn snapshot(
    cells: &[(usize, i8)],
    moves: &[(usize, usize, i64)],
    result: Option<GameResult>,
) -> GameSnapshot {
    let mut squares = vec![0i8; 90];
    for &(sq, piece) in cells {
        squares[sq] = piece;
    }
    GameSnapshot {
        game_id: "g1".to_string(),
        squares,
        side_to_move: 1,
        in_check: false,
        threefold: false,
        result,
        legal_moves: moves
            .iter()
            .map(|&(from, to, move_id)| LegalMove { from, to, move_id })
            .collect(),
    }
}

/// Controller with a fresh game already loaded from `initial`.
async fn started_controller(
    service: &Scripted,
    initial: GameSnapshot,
) -> (MoveController, mpsc::UnboundedReceiver<GameEvent>) {
    service.on_create(Ok(initial));
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut controller = MoveController::new(
        Box::new(service.clone()),
        EngineSelection::alpha_beta(3),
        event_tx,
    );
    controller.new_game().await.expect("new game failed");
    (controller, event_rx)
}

fn messages(controller: &MoveController) -> Vec<String> {
    controller
        .log()
        .entries()
        .iter()
        .map(|e| e.message.clone())
        .collect()
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn test_click_selects_any_square() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6)], &[(0, 9, 11)], None);
    let (mut controller, _rx) = started_controller(&service, initial).await;

    // A square with moves.
    controller.handle_click(0).await.unwrap();
    assert_eq!(controller.phase(), TurnPhase::Selected);
    let selection = controller.store().selection().unwrap();
    assert_eq!(selection.origin, 0);
    assert_eq!(selection.destinations, vec![9]);

    // Re-selecting an empty square is permitted, with no destinations.
    controller.handle_click(50).await.unwrap();
    assert_eq!(controller.phase(), TurnPhase::Selected);
    let selection = controller.store().selection().unwrap();
    assert_eq!(selection.origin, 50);
    assert!(selection.destinations.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_clicking_the_origin_deselects() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6)], &[(0, 9, 11)], None);
    let (mut controller, _rx) = started_controller(&service, initial).await;

    controller.handle_click(0).await.unwrap();
    controller.handle_click(0).await.unwrap();
    assert_eq!(controller.phase(), TurnPhase::Idle);
    assert!(controller.store().selection().is_none());

    // The same holds for an empty square with no destinations.
    controller.handle_click(50).await.unwrap();
    controller.handle_click(50).await.unwrap();
    assert_eq!(controller.phase(), TurnPhase::Idle);
    assert!(controller.store().selection().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_full_turn_logs_both_moves_in_order() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6), (89, -6)], &[(0, 9, 11)], None);
    let after_human = snapshot(&[(9, 6), (89, -6)], &[], None);
    let after_ai = snapshot(&[(9, 6), (80, -6)], &[(9, 18, 21)], None);

    let (mut controller, _rx) = started_controller(&service, initial).await;
    service.on_submit(Ok(after_human));
    service.on_best(Ok(Some(LegalMove {
        from: 89,
        to: 80,
        move_id: 99,
    })));
    service.on_submit(Ok(after_ai.clone()));

    controller.handle_click(0).await.unwrap();
    controller.handle_click(9).await.unwrap();

    assert_eq!(controller.phase(), TurnPhase::Idle);
    assert!(!controller.thinking());
    assert_eq!(controller.store().snapshot(), Some(&after_ai));

    // Newest first: AI reply, human move, the new-game marker.
    assert_eq!(
        messages(&controller),
        vec!["AI: 车 i9→i8", "你: 车 a0→a1", "新建对局"]
    );

    // Human move went by coordinates, the AI move by its opaque token.
    assert_eq!(
        service.submissions(),
        vec![
            MoveSubmission::Coords { from_sq: 0, to_sq: 9 },
            MoveSubmission::Token { move_id: 99 },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_capture_annotation_names_the_captured_piece() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6), (9, -1)], &[(0, 9, 11)], None);
    let after_human = snapshot(&[(9, 6)], &[], None);

    let (mut controller, _rx) = started_controller(&service, initial).await;
    service.on_submit(Ok(after_human));
    service.on_best(Ok(None));

    controller.handle_click(0).await.unwrap();
    controller.handle_click(9).await.unwrap();

    assert_eq!(messages(&controller)[0], "你: 车 a0→a1 (吃卒)");
}

#[tokio::test(start_paused = true)]
async fn test_terminal_result_suppresses_the_engine_query() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6)], &[(0, 9, 11)], None);
    let after_human = snapshot(&[(9, 6)], &[], Some(GameResult::RedWin));

    let (mut controller, mut rx) = started_controller(&service, initial).await;
    service.on_submit(Ok(after_human));

    controller.handle_click(0).await.unwrap();
    controller.handle_click(9).await.unwrap();

    assert_eq!(service.best_calls(), 0);
    assert_eq!(controller.phase(), TurnPhase::GameOver);
    assert_eq!(messages(&controller)[0], "对局结束: 红胜");

    let events = drain(&mut rx);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::GameEnded(GameResult::RedWin)))
    );

    // Terminal phase ignores further clicks.
    controller.handle_click(0).await.unwrap();
    assert_eq!(controller.phase(), TurnPhase::GameOver);
    assert!(controller.store().selection().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_live_result_issues_exactly_one_engine_query() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6)], &[(0, 9, 11)], None);
    let after_human = snapshot(&[(9, 6)], &[], None);

    let (mut controller, _rx) = started_controller(&service, initial).await;
    service.on_submit(Ok(after_human));
    service.on_best(Ok(None));

    controller.handle_click(0).await.unwrap();
    controller.handle_click(9).await.unwrap();

    assert_eq!(service.best_calls(), 1);
    // No best move: straight back to Idle, nothing logged for the engine.
    assert_eq!(controller.phase(), TurnPhase::Idle);
    assert!(!controller.thinking());
    assert_eq!(messages(&controller).len(), 2); // human move + new-game marker
}

#[tokio::test(start_paused = true)]
async fn test_clicking_a_non_destination_reselects() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6), (4, 7)], &[(0, 9, 11), (4, 13, 12)], None);
    let (mut controller, _rx) = started_controller(&service, initial).await;

    controller.handle_click(0).await.unwrap();
    controller.handle_click(4).await.unwrap();

    // No submission happened; the selection moved.
    assert!(service.submissions().is_empty());
    assert_eq!(controller.phase(), TurnPhase::Selected);
    let selection = controller.store().selection().unwrap();
    assert_eq!(selection.origin, 4);
    assert_eq!(selection.destinations, vec![13]);
}

#[tokio::test(start_paused = true)]
async fn test_human_submit_failure_leaves_everything_untouched() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6)], &[(0, 9, 11)], None);
    let (mut controller, _rx) = started_controller(&service, initial.clone()).await;
    service.on_submit(Err(ClientError::network("connection refused")));

    controller.handle_click(0).await.unwrap();
    let err = controller.handle_click(9).await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));

    // Snapshot and selection survive; no log entry was written.
    assert_eq!(controller.store().snapshot(), Some(&initial));
    assert_eq!(controller.store().selection().unwrap().origin, 0);
    assert_eq!(controller.phase(), TurnPhase::Selected);
    assert_eq!(messages(&controller), vec!["新建对局"]);
}

#[tokio::test(start_paused = true)]
async fn test_engine_failure_does_not_roll_back_the_human_half() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6)], &[(0, 9, 11)], None);
    let after_human = snapshot(&[(9, 6)], &[], None);

    let (mut controller, _rx) = started_controller(&service, initial).await;
    service.on_submit(Ok(after_human.clone()));
    service.on_best(Err(ClientError::network("timed out")));

    controller.handle_click(0).await.unwrap();
    let err = controller.handle_click(9).await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));

    // The committed human move stays; the turn just ends early.
    assert_eq!(controller.store().snapshot(), Some(&after_human));
    assert_eq!(controller.phase(), TurnPhase::Idle);
    assert!(!controller.thinking());
    assert_eq!(messages(&controller)[0], "你: 车 a0→a1");
}

#[tokio::test(start_paused = true)]
async fn test_thinking_indicator_wraps_the_engine_round_trip() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6), (89, -6)], &[(0, 9, 11)], None);
    let after_human = snapshot(&[(9, 6), (89, -6)], &[], None);
    let after_ai = snapshot(&[(9, 6), (80, -6)], &[], None);

    let (mut controller, mut rx) = started_controller(&service, initial).await;
    service.on_submit(Ok(after_human));
    service.on_best(Ok(Some(LegalMove {
        from: 89,
        to: 80,
        move_id: 99,
    })));
    service.on_submit(Ok(after_ai));

    controller.handle_click(0).await.unwrap();
    controller.handle_click(9).await.unwrap();

    let thinking: Vec<bool> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::AiThinking(on) => Some(on),
            _ => None,
        })
        .collect();
    assert_eq!(thinking, vec![true, false]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_undo_becomes_a_log_entry() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6)], &[(0, 9, 11)], None);
    let (mut controller, _rx) = started_controller(&service, initial.clone()).await;
    service.on_undo(Err(ClientError::validation("no move to undo")));

    controller.undo().await.unwrap();

    assert_eq!(messages(&controller)[0], "已到初始局面，无法继续悔棋");
    assert_eq!(controller.store().snapshot(), Some(&initial));
}

#[tokio::test(start_paused = true)]
async fn test_successful_undo_escapes_game_over() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6)], &[(0, 9, 11)], None);
    let after_human = snapshot(&[(9, 6)], &[], Some(GameResult::RedWin));
    let restored = snapshot(&[(0, 6)], &[(0, 9, 11)], None);

    let (mut controller, _rx) = started_controller(&service, initial).await;
    service.on_submit(Ok(after_human));

    controller.handle_click(0).await.unwrap();
    controller.handle_click(9).await.unwrap();
    assert_eq!(controller.phase(), TurnPhase::GameOver);

    service.on_undo(Ok(restored.clone()));
    controller.undo().await.unwrap();

    assert_eq!(controller.phase(), TurnPhase::Idle);
    assert_eq!(controller.store().snapshot(), Some(&restored));
    assert!(controller.store().selection().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_new_game_replaces_the_log() {
    let service = Scripted::default();
    let initial = snapshot(&[(0, 6)], &[(0, 9, 11)], None);
    let after_human = snapshot(&[(9, 6)], &[], None);

    let (mut controller, mut rx) = started_controller(&service, initial.clone()).await;
    service.on_submit(Ok(after_human));
    service.on_best(Ok(None));

    controller.handle_click(0).await.unwrap();
    controller.handle_click(9).await.unwrap();
    assert_eq!(messages(&controller).len(), 2);

    service.on_create(Ok(initial));
    controller.new_game().await.unwrap();

    assert_eq!(messages(&controller), vec!["新建对局"]);
    assert!(
        drain(&mut rx)
            .iter()
            .any(|e| matches!(e, GameEvent::LogCleared))
    );
}
