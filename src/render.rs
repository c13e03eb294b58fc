//! Diff-driven board rendering.

use crate::engine::{Engine, Piece, PieceCode};
use crate::geometry::{Orientation, Square};
use crate::view::BoardView;

/// Repaints the grid from engine ground truth. A per-square snapshot of the
/// last rendered codes keeps sprite writes to the squares that actually
/// changed, and those squares carry a transient highlight until the next
/// repaint leaves them untouched.
pub struct BoardRenderer {
    /// Last code rendered per view square; `None` until first painted.
    snapshot: [Option<PieceCode>; 64],
}

impl BoardRenderer {
    pub fn new() -> Self {
        BoardRenderer {
            snapshot: [None; 64],
        }
    }

    /// The piece currently rendered at a view square. Unpainted squares,
    /// empty squares and undecodable codes all read as vacant.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.snapshot[sq.index()].and_then(Piece::from_code)
    }

    /// Reads all 64 squares from the engine, through the orientation
    /// mapping, and writes the view where the code differs from the last
    /// sync. Unchanged squares get their highlight cleared; changed squares
    /// are repainted and highlighted, except on their very first paint.
    pub fn sync<E, V>(&mut self, orientation: Orientation, engine: &E, view: &mut V)
    where
        E: Engine,
        V: BoardView,
    {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let sq = Square::new(row, col);
                let (x, y) = orientation.engine_square(sq).engine_xy();
                let code = engine.get_piece(x, y);
                let prev = self.snapshot[sq.index()];
                if prev == Some(code) {
                    view.set_highlight(sq, false);
                } else {
                    view.set_piece(sq, Piece::from_code(code));
                    self.snapshot[sq.index()] = Some(code);
                    if prev.is_some() {
                        view.set_highlight(sq, true);
                    }
                }
            }
        }
    }
}

impl Default for BoardRenderer {
    fn default() -> Self {
        Self::new()
    }
}
