//! Wire types for the authoritative game state served by the rules engine.

use serde::{Deserialize, Serialize};

use crate::board::Piece;

/// Opaque server-issued token identifying a legal move.
pub type MoveId = i64;

/// A move the rules engine currently permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMove {
    /// Origin square index.
    pub from: usize,
    /// Destination square index.
    pub to: usize,
    /// Server token for submitting this move without coordinates.
    pub move_id: MoveId,
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    /// Red has won.
    RedWin,
    /// Black has won.
    BlackWin,
    /// Drawn game.
    Draw,
}

impl GameResult {
    /// Display label used in the activity log.
    pub fn label(&self) -> &'static str {
        match self {
            GameResult::RedWin => "红胜",
            GameResult::BlackWin => "黑胜",
            GameResult::Draw => "和棋",
        }
    }
}

/// Authoritative game state as last reported by the server.
///
/// Snapshots are immutable: every accepted move or undo replaces the whole
/// value, nothing is patched in place. Unknown server fields (zobrist key,
/// per-move coordinate strings) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Server identifier for this game.
    pub game_id: String,
    /// The 90 squares in rank-major order; 0 empty, magnitude 1–7 piece
    /// type, sign +red/−black.
    pub squares: Vec<i8>,
    /// Side to move: +1 red, −1 black.
    pub side_to_move: i8,
    /// Whether the side to move is in check.
    pub in_check: bool,
    /// Whether a threefold-repetition draw condition holds.
    #[serde(default)]
    pub threefold: bool,
    /// Terminal result, if the game has ended.
    #[serde(default)]
    pub result: Option<GameResult>,
    /// Moves currently permitted for the side to move.
    #[serde(default)]
    pub legal_moves: Vec<LegalMove>,
}

impl GameSnapshot {
    /// Decodes the piece on a square, if any.
    pub fn piece_at(&self, sq: usize) -> Option<Piece> {
        self.squares.get(sq).copied().and_then(Piece::from_cell)
    }

    /// Destinations of all legal moves originating at `from`.
    pub fn destinations_from(&self, from: usize) -> Vec<usize> {
        self.legal_moves
            .iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect()
    }

    /// The legal move from `from` to `to`, if the server listed one.
    pub fn legal_move(&self, from: usize, to: usize) -> Option<LegalMove> {
        self.legal_moves
            .iter()
            .copied()
            .find(|m| m.from == from && m.to == to)
    }
}

/// Body of a move-apply request: either an explicit coordinate pair or the
/// server's opaque move token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveSubmission {
    /// Submit by explicit origin and destination squares.
    Coords {
        /// Origin square index.
        from_sq: usize,
        /// Destination square index.
        to_sq: usize,
    },
    /// Submit by the server's opaque move token.
    Token {
        /// The token from [`LegalMove::move_id`].
        move_id: MoveId,
    },
}
