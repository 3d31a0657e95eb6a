//! Xiangqi client - unified CLI.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xiangqi_client::cli::{Cli, Command};
use xiangqi_client::{
    ArenaRequest, ClientConfig, EngineKind, EngineSelection, GameService, RestClient, tui,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            server_url,
            engine,
            depth,
            sims,
            tau,
            flipped,
        } => {
            let mut config = ClientConfig::from_file_or_default(config)?;
            config.apply_overrides(server_url, engine, depth, sims, tau, flipped);
            tui::run_play(config).await
        }
        Command::Arena {
            server_url,
            engine_a,
            engine_b,
            depth_a,
            depth_b,
            sims_a,
            sims_b,
            games,
        } => {
            run_arena(
                server_url,
                selection(engine_a, depth_a, sims_a),
                selection(engine_b, depth_b, sims_b),
                games,
            )
            .await
        }
    }
}

fn selection(kind: EngineKind, depth: u32, sims: u32) -> EngineSelection {
    if kind.is_simulation_based() {
        EngineSelection::mcts(kind, sims, 1.0)
    } else {
        EngineSelection::alpha_beta(depth)
    }
}

/// Runs a batch arena evaluation and prints the report.
async fn run_arena(
    server_url: String,
    engine_a: EngineSelection,
    engine_b: EngineSelection,
    games: u32,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Validated before any network call.
    let request = ArenaRequest::new(engine_a, engine_b, games)?;

    info!(
        engine_a = %request.engine_a().kind,
        engine_b = %request.engine_b().kind,
        games,
        "Running arena evaluation"
    );

    let client = RestClient::new(server_url);
    let report = client.run_arena(&request).await?;

    println!("{}", report.summary());
    Ok(())
}
