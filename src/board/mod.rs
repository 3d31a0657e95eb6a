//! Board coordinate math and piece vocabulary.

pub mod geometry;
mod piece;

pub use piece::{Piece, PieceType, Side};
