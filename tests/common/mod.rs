//! Scripted engine and recording view driving the end-to-end board tests.

use std::collections::VecDeque;

use chessview::{BoardView, Engine, Piece, PieceCode, PointerPos, Square};

pub const SQUARE_LEN: f64 = 64.0;

/// Board-local center of a view square.
pub fn center(sq: Square) -> PointerPos {
    PointerPos {
        x: (sq.col as f64 + 0.5) * SQUARE_LEN,
        y: (sq.row as f64 + 0.5) * SQUARE_LEN,
    }
}

/// An engine with a scripted rulebook: moves registered with `allow` are
/// applied, everything else refused, and each automated move pops the next
/// queued reply. Board indexing is the engine frame, `y * 8 + x`.
pub struct ScriptedEngine {
    codes: [PieceCode; 64],
    legal: Vec<(u8, u8, u8, u8)>,
    replies: VecDeque<(u8, u8, u8, u8)>,
    pub try_move_calls: Vec<(u8, u8, u8, u8)>,
    pub ai_moves: usize,
    pub refreshes: usize,
}

impl ScriptedEngine {
    /// The standard chess starting position: Black across the top two engine
    /// rows, White across the bottom two.
    pub fn starting_position() -> Self {
        let mut codes = [0; 64];
        let back = [2, 3, 4, 5, 6, 4, 3, 2];
        for x in 0..8 {
            codes[x] = -back[x]; // y = 0, black back rank
            codes[8 + x] = -1; // y = 1, black pawns
            codes[48 + x] = 1; // y = 6, white pawns
            codes[56 + x] = back[x]; // y = 7, white back rank
        }
        ScriptedEngine {
            codes,
            legal: Vec::new(),
            replies: VecDeque::new(),
            try_move_calls: Vec::new(),
            ai_moves: 0,
            refreshes: 0,
        }
    }

    pub fn allow(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) {
        self.legal.push((from_x, from_y, to_x, to_y));
    }

    pub fn queue_reply(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) {
        self.replies.push_back((from_x, from_y, to_x, to_y));
    }

    fn apply(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) {
        let from = from_y as usize * 8 + from_x as usize;
        let to = to_y as usize * 8 + to_x as usize;
        self.codes[to] = self.codes[from];
        self.codes[from] = 0;
    }
}

impl Engine for ScriptedEngine {
    fn try_move(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> bool {
        self.try_move_calls.push((from_x, from_y, to_x, to_y));
        if self.legal.contains(&(from_x, from_y, to_x, to_y)) {
            self.apply(from_x, from_y, to_x, to_y);
            true
        } else {
            false
        }
    }

    fn make_ai_move(&mut self) {
        self.ai_moves += 1;
        if let Some((fx, fy, tx, ty)) = self.replies.pop_front() {
            self.apply(fx, fy, tx, ty);
        }
    }

    fn refresh_player_moves(&mut self) {
        self.refreshes += 1;
    }

    fn get_piece(&self, x: u8, y: u8) -> PieceCode {
        self.codes[y as usize * 8 + x as usize]
    }
}

/// A view that keeps the state every mutation leaves behind, plus a write
/// counter for asserting how much repainting happened.
pub struct RecordingView {
    pub pieces: [Option<Piece>; 64],
    pub veiled: [bool; 64],
    pub highlighted: [bool; 64],
    pub float_piece: Option<Piece>,
    pub float_at: Option<PointerPos>,
    pub float_visible: bool,
    pub piece_writes: usize,
}

impl RecordingView {
    pub fn new() -> Self {
        RecordingView {
            pieces: [None; 64],
            veiled: [false; 64],
            highlighted: [false; 64],
            float_piece: None,
            float_at: None,
            float_visible: false,
            piece_writes: 0,
        }
    }

    pub fn piece(&self, sq: Square) -> Option<Piece> {
        self.pieces[sq.index()]
    }

    pub fn highlight_count(&self) -> usize {
        self.highlighted.iter().filter(|on| **on).count()
    }

    pub fn veiled_count(&self) -> usize {
        self.veiled.iter().filter(|v| **v).count()
    }
}

impl BoardView for RecordingView {
    fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.pieces[sq.index()] = piece;
        self.piece_writes += 1;
    }

    fn set_veiled(&mut self, sq: Square, veiled: bool) {
        self.veiled[sq.index()] = veiled;
    }

    fn set_highlight(&mut self, sq: Square, on: bool) {
        self.highlighted[sq.index()] = on;
    }

    fn begin_float(&mut self, piece: Piece, at: PointerPos) {
        self.float_piece = Some(piece);
        self.float_at = Some(at);
        self.float_visible = true;
    }

    fn move_float(&mut self, at: PointerPos) {
        self.float_at = Some(at);
    }

    fn end_float(&mut self) {
        self.float_visible = false;
    }
}
