//! Scripted engine and recording view shared by the unit tests.

use std::collections::VecDeque;

use crate::engine::{Engine, Piece, PieceCode};
use crate::geometry::{PointerPos, Square};
use crate::view::BoardView;

/// An engine whose position and rulings are scripted by the test: moves in
/// `legal` are applied, everything else refused, and each automated reply
/// pops the next scripted move. Indexing is the engine frame, `y * 8 + x`.
pub struct TestEngine {
    pub codes: [PieceCode; 64],
    pub legal: Vec<(u8, u8, u8, u8)>,
    pub reply_moves: VecDeque<(u8, u8, u8, u8)>,
    pub try_move_calls: Vec<(u8, u8, u8, u8)>,
    pub ai_moves: usize,
    pub refreshes: usize,
}

impl TestEngine {
    pub fn empty() -> Self {
        TestEngine {
            codes: [0; 64],
            legal: Vec::new(),
            reply_moves: VecDeque::new(),
            try_move_calls: Vec::new(),
            ai_moves: 0,
            refreshes: 0,
        }
    }

    pub fn set(&mut self, x: u8, y: u8, code: PieceCode) {
        self.codes[y as usize * 8 + x as usize] = code;
    }

    pub fn get(&self, x: u8, y: u8) -> PieceCode {
        self.codes[y as usize * 8 + x as usize]
    }

    pub fn allow(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) {
        self.legal.push((from_x, from_y, to_x, to_y));
    }

    pub fn queue_reply(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) {
        self.reply_moves.push_back((from_x, from_y, to_x, to_y));
    }

    fn apply(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) {
        let code = self.get(from_x, from_y);
        self.set(to_x, to_y, code);
        self.set(from_x, from_y, 0);
    }
}

impl Engine for TestEngine {
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
        if let Some((fx, fy, tx, ty)) = self.reply_moves.pop_front() {
            self.apply(fx, fy, tx, ty);
        }
    }

    fn refresh_player_moves(&mut self) {
        self.refreshes += 1;
    }

    fn get_piece(&self, x: u8, y: u8) -> PieceCode {
        self.get(x, y)
    }
}

/// A view that records the state every mutation leaves behind, plus enough
/// counters to assert how much repainting happened.
pub struct TestView {
    pub pieces: [Option<Piece>; 64],
    pub veiled: [bool; 64],
    pub highlighted: [bool; 64],
    pub float_piece: Option<Piece>,
    pub float_at: Option<PointerPos>,
    pub float_visible: bool,
    pub piece_writes: usize,
}

impl TestView {
    pub fn new() -> Self {
        TestView {
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

impl BoardView for TestView {
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
