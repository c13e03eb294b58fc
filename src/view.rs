//! The rendering surface the controller draws through.
//!
//! The browser implementation owns an image-per-square DOM grid; tests drive
//! the same trait with a recording fake. One square hosts one sprite, and a
//! single extra sprite floats above the grid while a drag is live.

use crate::engine::{Piece, PieceColor, PieceKind};
use crate::geometry::{PointerPos, Square};

/// The twelve sprite keys, piece letter then color letter, in the order
/// [`sprite_index`] produces. Host pages hand sprite urls over under these
/// names.
pub const SPRITE_KEYS: [&str; 12] = [
    "pw", "rw", "nw", "bw", "qw", "kw", "pb", "rb", "nb", "bb", "qb", "kb",
];

/// Index of a piece's sprite in [`SPRITE_KEYS`] and in url tables built
/// parallel to it.
pub fn sprite_index(piece: Piece) -> usize {
    let kind = match piece.kind {
        PieceKind::Pawn => 0,
        PieceKind::Rook => 1,
        PieceKind::Knight => 2,
        PieceKind::Bishop => 3,
        PieceKind::Queen => 4,
        PieceKind::King => 5,
    };
    match piece.color {
        PieceColor::White => kind,
        PieceColor::Black => kind + 6,
    }
}

/// The sprite key for a piece, e.g. `"pw"` for the white pawn.
pub fn sprite_key(piece: Piece) -> &'static str {
    SPRITE_KEYS[sprite_index(piece)]
}

/// Mutations the controller performs on the board surface.
pub trait BoardView {
    /// Shows the sprite for `piece` at `sq`, or clears the square.
    fn set_piece(&mut self, sq: Square, piece: Option<Piece>);

    /// Hides or re-reveals the sprite at `sq` without changing which sprite
    /// it is. The drag controller veils the source square while its piece
    /// floats under the pointer.
    fn set_veiled(&mut self, sq: Square, veiled: bool);

    /// Turns the just-changed highlight on or off.
    fn set_highlight(&mut self, sq: Square, on: bool);

    /// Shows the floating sprite for `piece`, centered on `at`.
    fn begin_float(&mut self, piece: Piece, at: PointerPos);

    /// Re-centers the floating sprite; only called between
    /// [`BoardView::begin_float`] and [`BoardView::end_float`].
    fn move_float(&mut self, at: PointerPos);

    /// Hides the floating sprite.
    fn end_float(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_piece_gets_a_distinct_sprite() {
        let mut seen = std::collections::HashSet::new();
        for code in [-6, -5, -4, -3, -2, -1, 1, 2, 3, 4, 5, 6] {
            let piece = Piece::from_code(code).unwrap();
            assert!(seen.insert(sprite_key(piece)));
            assert_eq!(SPRITE_KEYS[sprite_index(piece)], sprite_key(piece));
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn keys_pair_piece_letter_with_color_letter() {
        let wp = Piece::from_code(1).unwrap();
        let bn = Piece::from_code(-3).unwrap();
        let wk = Piece::from_code(6).unwrap();
        assert_eq!(sprite_key(wp), "pw");
        assert_eq!(sprite_key(bn), "nb");
        assert_eq!(sprite_key(wk), "kw");
    }
}
