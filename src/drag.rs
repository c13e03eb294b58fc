//! The drag gesture state machine.

use log::debug;

use crate::engine::Piece;
use crate::geometry::{PointerPos, Square};
use crate::view::BoardView;

enum State {
    Idle,
    Dragging { source: Square },
}

/// At most one gesture is live at a time. Every exit from `Dragging` funnels
/// through [`DragController::finish`], which re-reveals the source square
/// and hides the floating sprite before anything else happens, so an
/// interrupted or refused gesture can never leave a piece invisible.
pub struct DragController {
    state: State,
}

impl DragController {
    pub fn new() -> Self {
        DragController { state: State::Idle }
    }

    pub fn dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Source square of the live gesture, if one is live.
    pub fn source(&self) -> Option<Square> {
        match self.state {
            State::Dragging { source, .. } => Some(source),
            State::Idle => None,
        }
    }

    /// Starts a gesture: veils the source square and floats its piece under
    /// the pointer. A session left over from a missed release event is
    /// cancelled first, which restores the stray visuals before the new
    /// float appears.
    pub fn begin<V: BoardView>(&mut self, source: Square, piece: Piece, at: PointerPos, view: &mut V) {
        self.cancel(view);
        view.set_veiled(source, true);
        view.begin_float(piece, at);
        debug!("drag begun from ({}, {})", source.row, source.col);
        self.state = State::Dragging { source };
    }

    /// Keeps the float under the pointer. No square resolution happens here.
    pub fn motion<V: BoardView>(&mut self, at: PointerPos, view: &mut V) {
        if self.dragging() {
            view.move_float(at);
        }
    }

    /// Ends the live gesture, unconditionally reverting its visuals, and
    /// reports the source square. `None` when no gesture was live.
    pub fn finish<V: BoardView>(&mut self, view: &mut V) -> Option<Square> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => None,
            State::Dragging { source, .. } => {
                view.set_veiled(source, false);
                view.end_float();
                Some(source)
            }
        }
    }

    /// [`DragController::finish`] for exits that will not submit a move.
    pub fn cancel<V: BoardView>(&mut self, view: &mut V) {
        if self.finish(view).is_some() {
            debug!("stray drag session cancelled");
        }
    }
}
