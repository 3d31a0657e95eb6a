//! Piece vocabulary: sides, piece types, and their display names.

use serde::{Deserialize, Serialize};

/// Side of a piece, encoded on the wire as the sign of the cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Red, positive cell values. Moves first.
    Red,
    /// Black, negative cell values.
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Decodes a side from the sign convention used in snapshots
    /// (+1 red, −1 black).
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign.signum() {
            1 => Some(Side::Red),
            -1 => Some(Side::Black),
            _ => None,
        }
    }
}

/// The seven xiangqi piece types, with their wire magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    /// 兵/卒, magnitude 1.
    Soldier,
    /// 炮, magnitude 2.
    Cannon,
    /// 马, magnitude 3.
    Horse,
    /// 相/象, magnitude 4.
    Elephant,
    /// 仕/士, magnitude 5.
    Advisor,
    /// 车, magnitude 6.
    Chariot,
    /// 帅/将, magnitude 7.
    General,
}

impl PieceType {
    /// Decodes a piece type from a cell magnitude (1–7).
    pub fn from_magnitude(magnitude: i8) -> Option<Self> {
        match magnitude {
            1 => Some(PieceType::Soldier),
            2 => Some(PieceType::Cannon),
            3 => Some(PieceType::Horse),
            4 => Some(PieceType::Elephant),
            5 => Some(PieceType::Advisor),
            6 => Some(PieceType::Chariot),
            7 => Some(PieceType::General),
            _ => None,
        }
    }
}

/// A piece as it sits on a square: type plus owning side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Which of the seven piece types this is.
    pub kind: PieceType,
    /// Which side owns it.
    pub side: Side,
}

impl Piece {
    /// Decodes a piece from a signed board cell; `None` for an empty cell
    /// or a magnitude outside 1–7.
    pub fn from_cell(cell: i8) -> Option<Self> {
        let side = Side::from_sign(cell)?;
        let kind = PieceType::from_magnitude(cell.abs())?;
        Some(Self { kind, side })
    }

    /// The CJK character the UI and move log show for this piece. Soldier,
    /// elephant, advisor, and general have distinct red/black forms.
    pub fn name(&self) -> &'static str {
        use PieceType::*;
        use Side::*;
        match (self.kind, self.side) {
            (Soldier, Red) => "兵",
            (Soldier, Black) => "卒",
            (Cannon, _) => "炮",
            (Horse, _) => "马",
            (Elephant, Red) => "相",
            (Elephant, Black) => "象",
            (Advisor, Red) => "仕",
            (Advisor, Black) => "士",
            (Chariot, _) => "车",
            (General, Red) => "帅",
            (General, Black) => "将",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_signed_cells() {
        let red_chariot = Piece::from_cell(6).unwrap();
        assert_eq!(red_chariot.kind, PieceType::Chariot);
        assert_eq!(red_chariot.side, Side::Red);

        let black_soldier = Piece::from_cell(-1).unwrap();
        assert_eq!(black_soldier.kind, PieceType::Soldier);
        assert_eq!(black_soldier.side, Side::Black);

        assert_eq!(Piece::from_cell(0), None);
        assert_eq!(Piece::from_cell(8), None);
        assert_eq!(Piece::from_cell(-9), None);
    }

    #[test]
    fn red_and_black_forms_differ_where_they_should() {
        let red = Piece::from_cell(4).unwrap();
        let black = Piece::from_cell(-4).unwrap();
        assert_eq!(red.name(), "相");
        assert_eq!(black.name(), "象");

        // Cannon and chariot share one form.
        assert_eq!(Piece::from_cell(6).unwrap().name(), "车");
        assert_eq!(Piece::from_cell(-6).unwrap().name(), "车");
    }
}
