//! The engine collaborator: the signed piece-code wire encoding and the
//! capability set the board controller needs from a move validator.

/// Signed piece code as the engine reports it: `0` is an empty square, the
/// sign is the color (positive White), the magnitude `1..=6` the kind. Any
/// other value (the engine answers `-99` to an out-of-range query) carries
/// through diffing untouched but decodes to no piece.
pub type PieceCode = i32;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Kind for a code magnitude in `1..=6`.
    #[inline]
    fn from_magnitude(m: u32) -> Option<Self> {
        Some(match m {
            1 => PieceKind::Pawn,
            2 => PieceKind::Rook,
            3 => PieceKind::Knight,
            4 => PieceKind::Bishop,
            5 => PieceKind::Queen,
            6 => PieceKind::King,
            _ => return None,
        })
    }

    #[inline]
    fn magnitude(self) -> i32 {
        self as i32 + 1
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PieceColor {
    White,
    Black,
}

/// A decoded, renderable piece.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    /// Decodes an engine code. `None` for the empty code and for any
    /// magnitude outside the piece table.
    pub fn from_code(code: PieceCode) -> Option<Self> {
        let kind = PieceKind::from_magnitude(code.unsigned_abs())?;
        let color = if code > 0 {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(Piece { kind, color })
    }

    /// Inverse of [`Piece::from_code`].
    pub fn code(self) -> PieceCode {
        match self.color {
            PieceColor::White => self.kind.magnitude(),
            PieceColor::Black => -self.kind.magnitude(),
        }
    }
}

/// What the board controller requires of the move-validating engine. The
/// method names match the deployed engine's exported API, so the browser
/// binding stays a direct mirror. Coordinates are the engine frame's
/// `(x = column, y = row)`, both in `[0, 8)`.
pub trait Engine {
    /// Applies the move when it is legal for the side whose turn it is;
    /// reports whether it was applied. Nothing changes on a refusal.
    fn try_move(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> bool;

    /// Picks and applies one automated move for the engine's side.
    fn make_ai_move(&mut self);

    /// Recomputes legal-move state for the human side. Must run after any
    /// position change, before the human is allowed to move again.
    fn refresh_player_moves(&mut self);

    /// The piece code at engine coordinates `(x, y)`.
    fn get_piece(&self, x: u8, y: u8) -> PieceCode;
}
