//! Turn sequencing: one human move, one automated reply, one lock.

use log::{debug, warn};

use crate::engine::Engine;
use crate::geometry::{Orientation, Square};
use crate::render::BoardRenderer;
use crate::view::BoardView;

/// What became of a submitted move.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Submission {
    /// Dropped without consulting the engine: the board was locked, no
    /// gesture was live, or there was no usable destination.
    Ignored,
    /// The engine refused the move. Nothing changed.
    Rejected,
    /// The move was applied and rendered; the board stays locked until the
    /// scheduled reply completes.
    Applied,
}

/// Sequences a human move and the automated reply that answers it. The lock
/// is the single concurrency guard: it holds from an applied human move
/// until the end of the reply, so a second submission can never race the
/// reply it is waiting on.
pub struct TurnCoordinator {
    locked: bool,
}

impl TurnCoordinator {
    pub fn new() -> Self {
        TurnCoordinator { locked: false }
    }

    /// Whether a reply is pending. While true, no move may be submitted and
    /// no drag may start.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// First half of a turn: hands the move to the engine and, if it was
    /// applied, renders it and locks the board. The caller schedules
    /// [`TurnCoordinator::complete_reply`] on `Applied`.
    pub fn submit<E, V>(
        &mut self,
        from: Square,
        to: Square,
        orientation: Orientation,
        engine: &mut E,
        renderer: &mut BoardRenderer,
        view: &mut V,
    ) -> Submission
    where
        E: Engine,
        V: BoardView,
    {
        if self.locked {
            return Submission::Ignored;
        }
        let (fx, fy) = orientation.engine_square(from).engine_xy();
        let (tx, ty) = orientation.engine_square(to).engine_xy();
        if !engine.try_move(fx, fy, tx, ty) {
            debug!("engine refused ({},{}) -> ({},{})", from.row, from.col, to.row, to.col);
            return Submission::Rejected;
        }
        self.locked = true;
        debug!("move applied, board locked");
        renderer.sync(orientation, engine, view);
        Submission::Applied
    }

    /// Second half of a turn, run after the UI pacing delay: applies the
    /// automated reply, renders it, refreshes the human's legal moves and
    /// releases the lock. Without a pending turn this is a no-op.
    pub fn complete_reply<E, V>(
        &mut self,
        orientation: Orientation,
        engine: &mut E,
        renderer: &mut BoardRenderer,
        view: &mut V,
    ) where
        E: Engine,
        V: BoardView,
    {
        if !self.locked {
            warn!("reply completion without a pending turn");
            return;
        }
        engine.make_ai_move();
        renderer.sync(orientation, engine, view);
        engine.refresh_player_moves();
        self.locked = false;
        debug!("reply rendered, board unlocked");
    }
}
