//! Remote move-generation engine selection.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// The engines the server exposes for best-move queries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Alpha-beta search, parameterized by depth.
    #[strum(serialize = "ab")]
    #[serde(rename = "ab")]
    AlphaBeta,
    /// Monte-Carlo tree search with a uniform policy, parameterized by
    /// simulation count and temperature.
    #[strum(serialize = "mcts")]
    Mcts,
    /// MCTS guided by the neural network.
    #[strum(serialize = "mcts_nn")]
    MctsNn,
}

impl EngineKind {
    /// Whether this engine takes simulation-count/temperature parameters
    /// rather than a search depth.
    pub fn is_simulation_based(self) -> bool {
        matches!(self, EngineKind::Mcts | EngineKind::MctsNn)
    }
}

/// A concrete engine choice with its parameters, as sent on best-move
/// queries and in arena configurations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSelection {
    /// Which engine family to query.
    pub kind: EngineKind,
    /// Search depth, used by [`EngineKind::AlphaBeta`].
    pub depth: u32,
    /// Simulation count, used by the MCTS family.
    pub sims: u32,
    /// Sampling temperature, used by the MCTS family.
    pub tau: f64,
}

impl EngineSelection {
    /// A depth-3 alpha-beta selection, the server's default.
    pub fn alpha_beta(depth: u32) -> Self {
        Self {
            kind: EngineKind::AlphaBeta,
            depth,
            sims: 100,
            tau: 1.0,
        }
    }

    /// An MCTS selection with the given simulation budget and temperature.
    pub fn mcts(kind: EngineKind, sims: u32, tau: f64) -> Self {
        Self {
            kind,
            depth: 3,
            sims,
            tau,
        }
    }

    /// Query-string parameters for a best-move request. Only the parameters
    /// the chosen engine family consumes are sent.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("engine", self.kind.to_string())];
        if self.kind.is_simulation_based() {
            params.push(("sims", self.sims.to_string()));
            params.push(("tau", self.tau.to_string()));
        } else {
            params.push(("depth", self.depth.to_string()));
        }
        params
    }

    /// Engine parameters as the arena endpoint expects them.
    pub fn arena_params(&self) -> serde_json::Value {
        if self.kind.is_simulation_based() {
            json!({ "sims": self.sims })
        } else {
            json!({ "depth": self.depth })
        }
    }
}

impl Default for EngineSelection {
    fn default() -> Self {
        Self::alpha_beta(3)
    }
}
