//! Xiangqi client library.
//!
//! A terminal client for playing xiangqi against a remote move-generation
//! server. The server owns the rules and the search engines; this crate
//! owns the turn sequencing on the human side:
//!
//! - **Board**: pure coordinate math and piece vocabulary.
//! - **Game**: server snapshots, the selection store, and the activity log.
//! - **Controller**: the state machine that submits the human move,
//!   inspects the result, and requests and submits the engine's reply.
//! - **Client**: the REST gateway the controller talks through.
//! - **Arena**: batch engine-vs-engine evaluation requests.
//!
//! # Example
//!
//! ```no_run
//! use tokio::sync::mpsc;
//! use xiangqi_client::{EngineSelection, MoveController, RestClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Box::new(RestClient::new("http://127.0.0.1:8000"));
//! let (event_tx, _event_rx) = mpsc::unbounded_channel();
//! let mut controller = MoveController::new(client, EngineSelection::alpha_beta(3), event_tx);
//! controller.new_game().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod arena;
mod client;
mod config;
mod controller;
mod engine;
mod error;

// Public module declarations
pub mod board;
pub mod cli;
pub mod game;
pub mod tui;

// Crate-level exports - arena evaluation
pub use arena::{ArenaReport, ArenaRequest, MAX_GAMES, MIN_GAMES};

// Crate-level exports - network gateway
pub use client::{GameService, RestClient};

// Crate-level exports - configuration
pub use config::ClientConfig;

// Crate-level exports - controller
pub use controller::{Command, GameEvent, MoveController, TurnPhase};

// Crate-level exports - engine selection
pub use engine::{EngineKind, EngineSelection};

// Crate-level exports - errors
pub use error::ClientError;
