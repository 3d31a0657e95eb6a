//! Batch arena evaluation between two engine configurations.
//!
//! A long-running bulk job on the server that the move controller never
//! participates in; the client's responsibility ends at validating the
//! request and presenting the aggregated report.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::engine::EngineSelection;
use crate::error::ClientError;

/// Smallest permitted game count.
pub const MIN_GAMES: u32 = 2;
/// Largest permitted game count.
pub const MAX_GAMES: u32 = 100;

/// An arena run: two engines and how many games they play. Colors alternate
/// on the server, which is why the count must be even.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ArenaRequest {
    /// Engine playing side A.
    engine_a: EngineSelection,
    /// Engine playing side B.
    engine_b: EngineSelection,
    /// Total games to play; even, in [2, 100].
    n_games: u32,
}

impl ArenaRequest {
    /// Builds a request, rejecting an odd or out-of-range game count
    /// before any network traffic.
    pub fn new(
        engine_a: EngineSelection,
        engine_b: EngineSelection,
        n_games: u32,
    ) -> Result<Self, ClientError> {
        if !(MIN_GAMES..=MAX_GAMES).contains(&n_games) {
            return Err(ClientError::config(format!(
                "game count must be between {MIN_GAMES} and {MAX_GAMES}, got {n_games}"
            )));
        }
        if n_games % 2 != 0 {
            return Err(ClientError::config(format!(
                "game count must be even so colors can alternate, got {n_games}"
            )));
        }
        Ok(Self {
            engine_a,
            engine_b,
            n_games,
        })
    }

    /// JSON body for the server's arena endpoint.
    pub fn body(&self) -> serde_json::Value {
        json!({
            "engine_a": self.engine_a.kind.to_string(),
            "engine_b": self.engine_b.kind.to_string(),
            "params_a": self.engine_a.arena_params(),
            "params_b": self.engine_b.arena_params(),
            "n_games": self.n_games,
        })
    }
}

/// Aggregated outcome of an arena run, from side A's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct ArenaReport {
    /// Games won by engine A.
    wins: u32,
    /// Drawn games.
    draws: u32,
    /// Games won by engine B.
    losses: u32,
    /// Estimated rating difference of A over B.
    elo_diff: f64,
}

impl ArenaReport {
    /// One-line summary for the CLI.
    pub fn summary(&self) -> String {
        format!(
            "A {} / draw {} / B {}  (elo diff {:+.1})",
            self.wins, self.draws, self.losses, self.elo_diff
        )
    }
}
