//! Board geometry: squares, orientation mirroring, pointer → square mapping.

/// One cell of the 8×8 grid, addressed in view order: `row` 0 is the top
/// rank on screen, `col` 0 the leftmost file. Both are always in `[0, 8)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self { row, col }
    }

    /// Flat index into 64-entry per-square tables, row-major.
    #[inline]
    pub fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// The same cell as seen from the opposite side of the board.
    #[inline]
    pub fn mirrored(self) -> Self {
        Self {
            row: 7 - self.row,
            col: 7 - self.col,
        }
    }

    /// The square in the engine's wire order: `x` is the column, `y` the row.
    #[inline]
    pub fn engine_xy(self) -> (u8, u8) {
        (self.col, self.row)
    }
}

/// The color the human plays. Fixed at mount, it decides how view squares
/// map onto the engine's frame: White reads the frame as-is, Black reads it
/// rotated a half turn so the human's pieces start at the bottom edge.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Orientation {
    White,
    Black,
}

impl Orientation {
    /// Maps a view square into the engine's frame. The transform is its own
    /// inverse, so it equally maps engine squares back to view squares.
    #[inline]
    pub fn engine_square(self, sq: Square) -> Square {
        match self {
            Orientation::White => sq,
            Orientation::Black => sq.mirrored(),
        }
    }

    #[inline]
    pub fn is_mirrored(self) -> bool {
        self == Orientation::Black
    }
}

/// A pointer position in board-local logical pixels: client coordinates with
/// the board's on-page origin already subtracted. Mouse and touch handlers
/// both normalize into this.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

/// Pointer → square resolution for a fixed square edge length.
#[derive(Copy, Clone, Debug)]
pub struct SquareGrid {
    square_len: f64,
}

impl SquareGrid {
    #[inline]
    pub fn new(square_len: f64) -> Self {
        debug_assert!(square_len > 0.0);
        Self { square_len }
    }

    /// Edge length of one square in logical pixels.
    #[inline]
    pub fn square_len(&self) -> f64 {
        self.square_len
    }

    /// Resolves a board-local position to the square under it, or `None`
    /// when the position lies outside the grid. Nothing is clamped: points
    /// left of or above the board are off-board, and the far edges are
    /// exclusive (`x == 8·len` already misses).
    pub fn square_at(&self, p: PointerPos) -> Option<Square> {
        let col = p.x / self.square_len;
        let row = p.y / self.square_len;
        // The negated form also rejects NaN.
        if !(col >= 0.0 && col < 8.0 && row >= 0.0 && row < 8.0) {
            return None;
        }
        Some(Square::new(row as u8, col as u8))
    }
}
