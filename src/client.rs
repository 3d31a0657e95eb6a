//! HTTP gateway to the move-generation server.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::arena::{ArenaReport, ArenaRequest};
use crate::engine::EngineSelection;
use crate::error::ClientError;
use crate::game::{GameSnapshot, LegalMove, MoveSubmission};

/// The network calls the controller and CLI consume. Implemented by
/// [`RestClient`] against the real server and by scripted fakes in tests.
#[async_trait]
pub trait GameService: Send + Sync {
    /// Creates a game from the starting position and returns its first
    /// snapshot (which carries the new game id).
    async fn create_game(&self) -> Result<GameSnapshot, ClientError>;

    /// Fetches the current snapshot of an existing game.
    async fn fetch_game(&self, game_id: &str) -> Result<GameSnapshot, ClientError>;

    /// Applies a move and returns the updated snapshot, which may carry a
    /// terminal result.
    async fn submit_move(
        &self,
        game_id: &str,
        submission: MoveSubmission,
    ) -> Result<GameSnapshot, ClientError>;

    /// Asks the selected engine for its best move, or `None` when the
    /// engine has nothing to play.
    async fn best_move(
        &self,
        game_id: &str,
        engine: &EngineSelection,
    ) -> Result<Option<LegalMove>, ClientError>;

    /// Retracts the last move. Fails with [`ClientError::Validation`] at
    /// the initial position.
    async fn undo(&self, game_id: &str) -> Result<GameSnapshot, ClientError>;

    /// Runs a batch arena evaluation; blocks until all games finish.
    async fn run_arena(&self, request: &ArenaRequest) -> Result<ArenaReport, ClientError>;
}

#[derive(Debug, Deserialize)]
struct BestMoveResponse {
    best: Option<LegalMove>,
}

/// REST client for the server's `/api` surface.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestClient {
    /// Creates a client for a server base URL such as
    /// `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        info!(base_url = %base_url, "Creating REST client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a non-success response to the error taxonomy: HTTP 400 means
    /// the server called the request invalid, anything else is a network
    /// failure.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = %status, body = %body, "Server returned non-success");
        if status == StatusCode::BAD_REQUEST {
            Err(ClientError::validation(body))
        } else {
            Err(ClientError::network(format!("{status}: {body}")))
        }
    }

    async fn get_snapshot(&self, url: String) -> Result<GameSnapshot, ClientError> {
        let response = self.client.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[async_trait]
impl GameService for RestClient {
    #[instrument(skip(self))]
    async fn create_game(&self) -> Result<GameSnapshot, ClientError> {
        info!("Creating new game");
        let response = self
            .client
            .post(self.url("/api/games"))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let snapshot: GameSnapshot = Self::check(response).await?.json().await?;
        info!(game_id = %snapshot.game_id, "Game created");
        Ok(snapshot)
    }

    #[instrument(skip(self))]
    async fn fetch_game(&self, game_id: &str) -> Result<GameSnapshot, ClientError> {
        debug!("Fetching game state");
        self.get_snapshot(self.url(&format!("/api/games/{game_id}")))
            .await
    }

    #[instrument(skip(self), fields(submission = ?submission))]
    async fn submit_move(
        &self,
        game_id: &str,
        submission: MoveSubmission,
    ) -> Result<GameSnapshot, ClientError> {
        debug!("Submitting move");
        let response = self
            .client
            .post(self.url(&format!("/api/games/{game_id}/move")))
            .json(&submission)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self, engine), fields(engine = %engine.kind))]
    async fn best_move(
        &self,
        game_id: &str,
        engine: &EngineSelection,
    ) -> Result<Option<LegalMove>, ClientError> {
        debug!("Requesting best move");
        let response = self
            .client
            .get(self.url(&format!("/api/games/{game_id}/best-move")))
            .query(&engine.query_params())
            .send()
            .await?;
        let parsed: BestMoveResponse = Self::check(response).await?.json().await?;
        debug!(best = ?parsed.best, "Best-move response");
        Ok(parsed.best)
    }

    #[instrument(skip(self))]
    async fn undo(&self, game_id: &str) -> Result<GameSnapshot, ClientError> {
        debug!("Requesting undo");
        let response = self
            .client
            .post(self.url(&format!("/api/games/{game_id}/undo")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip_all, fields(n_games = request.n_games()))]
    async fn run_arena(&self, request: &ArenaRequest) -> Result<ArenaReport, ClientError> {
        info!("Starting arena run");
        let response = self
            .client
            .post(self.url("/api/arena/run"))
            .json(&request.body())
            .send()
            .await?;
        let report: ArenaReport = Self::check(response).await?.json().await?;
        info!(
            wins = report.wins(),
            draws = report.draws(),
            losses = report.losses(),
            "Arena run finished"
        );
        Ok(report)
    }
}
