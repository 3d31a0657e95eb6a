//! Command-line interface for the xiangqi client.

use clap::{Parser, Subcommand};

use crate::engine::EngineKind;

/// Xiangqi client — play against a remote move-generation server
#[derive(Parser, Debug)]
#[command(name = "xiangqi_client")]
#[command(about = "Terminal client for a xiangqi move-generation server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the server in the terminal UI
    Play {
        /// Path to the TOML config file (defaults are used if absent)
        #[arg(long, default_value = "xiangqi.toml")]
        config: std::path::PathBuf,

        /// Server base URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,

        /// Engine to play against (overrides the config file)
        #[arg(long, value_enum)]
        engine: Option<EngineKind>,

        /// Alpha-beta search depth
        #[arg(long)]
        depth: Option<u32>,

        /// MCTS simulation count
        #[arg(long)]
        sims: Option<u32>,

        /// MCTS sampling temperature
        #[arg(long)]
        tau: Option<f64>,

        /// Show black at the bottom of the screen
        #[arg(long)]
        flipped: bool,
    },

    /// Run a batch arena evaluation between two engines
    Arena {
        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        server_url: String,

        /// Engine for side A
        #[arg(long, value_enum, default_value = "alpha-beta")]
        engine_a: EngineKind,

        /// Engine for side B
        #[arg(long, value_enum, default_value = "mcts")]
        engine_b: EngineKind,

        /// Search depth for side A (alpha-beta)
        #[arg(long, default_value = "3")]
        depth_a: u32,

        /// Search depth for side B (alpha-beta)
        #[arg(long, default_value = "3")]
        depth_b: u32,

        /// Simulation count for side A (MCTS family)
        #[arg(long, default_value = "100")]
        sims_a: u32,

        /// Simulation count for side B (MCTS family)
        #[arg(long, default_value = "100")]
        sims_b: u32,

        /// Number of games to play (even, 2-100)
        #[arg(long, default_value = "10")]
        games: u32,
    },
}
