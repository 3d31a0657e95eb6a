//! Terminal UI for playing against the server.
//!
//! The controller runs as its own task and owns all game state; the UI
//! task renders from a view model fed by [`GameEvent`]s and sends
//! [`Command`]s back. Rendering therefore never blocks on a network
//! round-trip: the board keeps drawing while a turn is in flight.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{error, info, instrument};

use crate::client::RestClient;
use crate::config::ClientConfig;
use crate::controller::{Command, GameEvent, MoveController};

use app::App;
use input::Action;

/// Runs the play TUI until the user quits.
pub async fn run_play(config: ClientConfig) -> Result<()> {
    // Log to a file so tracing output does not tear the alternate screen.
    let log_file = std::fs::File::create("xiangqi_client.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %config.server_url(), "Starting xiangqi TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let service = Box::new(RestClient::new(config.server_url().clone()));
    let mut controller = MoveController::new(service, config.engine_selection(), event_tx);
    let controller_task = tokio::spawn(async move {
        controller.run(command_rx).await;
    });

    // Open with a fresh game.
    let _ = command_tx.send(Command::NewGame);

    let mut app = App::new(*config.flipped());
    let res = run_ui(&mut terminal, &mut app, &mut event_rx, &command_tx).await;

    // Closing the command channel ends the controller loop.
    drop(command_tx);
    let _ = controller_task.await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "UI loop error");
    }
    res
}

/// Draws, drains controller events, and forwards input until quit.
#[instrument(skip_all)]
async fn run_ui<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
    command_tx: &mpsc::UnboundedSender<Command>,
) -> Result<()> {
    loop {
        while let Ok(game_event) = event_rx.try_recv() {
            app.apply_event(game_event);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match input::action_for(key.code) {
                Some(Action::Quit) => {
                    info!("User quit");
                    return Ok(());
                }
                Some(Action::MoveCursor(direction)) => app.move_cursor(direction),
                Some(Action::Click) => {
                    let _ = command_tx.send(Command::Click(app.cursor_index()));
                }
                Some(Action::NewGame) => {
                    let _ = command_tx.send(Command::NewGame);
                }
                Some(Action::Undo) => {
                    let _ = command_tx.send(Command::Undo);
                }
                Some(Action::Flip) => app.flip(),
                None => {}
            }
        }

        sleep(Duration::from_millis(10)).await;
    }
}
