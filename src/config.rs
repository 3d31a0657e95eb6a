//! Client configuration loaded from a TOML file.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::engine::{EngineKind, EngineSelection};
use crate::error::ClientError;

/// Settings for the play client. Every field has a default, so a partial
/// (or absent) config file is fine.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the move-generation server.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Engine queried for the opponent's moves.
    #[serde(default = "default_engine")]
    engine: EngineKind,

    /// Alpha-beta search depth.
    #[serde(default = "default_depth")]
    depth: u32,

    /// MCTS simulation count.
    #[serde(default = "default_sims")]
    sims: u32,

    /// MCTS sampling temperature.
    #[serde(default = "default_tau")]
    tau: f64,

    /// Show black at the bottom of the screen.
    #[serde(default)]
    flipped: bool,
}

fn default_server_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_engine() -> EngineKind {
    EngineKind::AlphaBeta
}

fn default_depth() -> u32 {
    3
}

fn default_sims() -> u32 {
    100
}

fn default_tau() -> f64 {
    1.0
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            engine: default_engine(),
            depth: default_depth(),
            sims: default_sims(),
            tau: default_tau(),
            flipped: false,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        debug!(path = %path.as_ref().display(), "Loading config file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ClientError::config(format!("failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ClientError::config(format!("failed to parse config: {e}")))?;

        info!(server_url = %config.server_url, engine = %config.engine, "Config loaded");
        Ok(config)
    }

    /// Loads the file when it exists, defaults otherwise.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!(path = %path.as_ref().display(), "No config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of the loaded file.
    pub fn apply_overrides(
        &mut self,
        server_url: Option<String>,
        engine: Option<EngineKind>,
        depth: Option<u32>,
        sims: Option<u32>,
        tau: Option<f64>,
        flipped: bool,
    ) {
        if let Some(server_url) = server_url {
            self.server_url = server_url;
        }
        if let Some(engine) = engine {
            self.engine = engine;
        }
        if let Some(depth) = depth {
            self.depth = depth;
        }
        if let Some(sims) = sims {
            self.sims = sims;
        }
        if let Some(tau) = tau {
            self.tau = tau;
        }
        if flipped {
            self.flipped = true;
        }
    }

    /// The engine selection this config describes.
    pub fn engine_selection(&self) -> EngineSelection {
        EngineSelection {
            kind: self.engine,
            depth: self.depth,
            sims: self.sims,
            tau: self.tau,
        }
    }
}
