//! Pure board geometry: index math, algebraic coordinates, and the pixel
//! layout of the grid lines.
//!
//! Squares are numbered `rank * FILES + file`, rank 0 at black's back rank.
//! All functions here are total over their stated domains and never touch
//! game state.

/// Number of files (columns).
pub const FILES: usize = 9;
/// Number of ranks (rows).
pub const RANKS: usize = 10;
/// Total squares on the board.
pub const NUM_SQUARES: usize = FILES * RANKS;

/// Square cell size in pixels.
pub const CELL: f64 = 56.0;
/// Gap between cells in pixels.
pub const GAP: f64 = 2.0;

/// File (0–8) of a square index.
pub fn file_of(sq: usize) -> usize {
    sq % FILES
}

/// Rank (0–9) of a square index.
pub fn rank_of(sq: usize) -> usize {
    sq / FILES
}

/// Square index of a (file, rank) pair.
pub fn index_of(file: usize, rank: usize) -> usize {
    rank * FILES + file
}

/// Pixel center of the n-th column or row.
pub fn center(n: usize) -> f64 {
    n as f64 * (CELL + GAP) + CELL / 2.0
}

/// Total board width in pixels.
pub fn board_width() -> f64 {
    FILES as f64 * CELL + (FILES - 1) as f64 * GAP
}

/// Total board height in pixels.
pub fn board_height() -> f64 {
    RANKS as f64 * CELL + (RANKS - 1) as f64 * GAP
}

/// Algebraic coordinate of a square: file letter then rank numeral
/// ("a0" through "i9").
pub fn coord(sq: usize) -> String {
    let file = b'a' + file_of(sq) as u8;
    format!("{}{}", file as char, rank_of(sq))
}

/// Parses an algebraic coordinate back to a square index.
pub fn parse_coord(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    let file = chars.next()?;
    let file = (file as usize).checked_sub('a' as usize)?;
    if file >= FILES {
        return None;
    }
    let rank: usize = chars.as_str().parse().ok()?;
    if rank >= RANKS {
        return None;
    }
    Some(index_of(file, rank))
}

/// Board index shown at screen position (row `dr`, column `df`).
///
/// With `flipped = false` red sits at the bottom of the screen, so screen
/// rows run opposite to ranks; flipping puts black at the bottom instead.
pub fn display_index(dr: usize, df: usize, flipped: bool) -> usize {
    let rank = if flipped { dr } else { RANKS - 1 - dr };
    index_of(df, rank)
}

/// A line segment of the board lattice, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start x.
    pub x1: f64,
    /// Start y.
    pub y1: f64,
    /// End x.
    pub x2: f64,
    /// End y.
    pub y2: f64,
}

impl Segment {
    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// All 30 segments of the xiangqi lattice: 10 horizontals, full-height
/// verticals at the edge files, river-split vertical pairs for the seven
/// interior files, and the 4 palace diagonals.
pub fn grid_lines() -> Vec<Segment> {
    let mut lines = Vec::with_capacity(30);

    for r in 0..RANKS {
        let y = center(r);
        lines.push(Segment::new(center(0), y, center(FILES - 1), y));
    }

    for f in 0..FILES {
        let x = center(f);
        if f == 0 || f == FILES - 1 {
            lines.push(Segment::new(x, center(0), x, center(RANKS - 1)));
        } else {
            // Interior verticals stop at the river between ranks 4 and 5.
            lines.push(Segment::new(x, center(0), x, center(4)));
            lines.push(Segment::new(x, center(5), x, center(RANKS - 1)));
        }
    }

    // Palace diagonals: files 3–5 crossed with ranks 0–2 and 7–9.
    lines.push(Segment::new(center(3), center(0), center(5), center(2)));
    lines.push(Segment::new(center(5), center(0), center(3), center(2)));
    lines.push(Segment::new(center(3), center(7), center(5), center(9)));
    lines.push(Segment::new(center(5), center(7), center(3), center(9)));

    lines
}

/// Vertical pixel midpoint of the river, where the bank inscriptions sit.
pub fn river_y() -> f64 {
    (center(4) + center(5)) / 2.0
}
