//! The board controller: pointer gestures in, engine calls and view
//! mutations out.

use log::debug;

use crate::drag::DragController;
use crate::engine::Engine;
use crate::geometry::{Orientation, PointerPos, Square, SquareGrid};
use crate::render::BoardRenderer;
use crate::turn::{Submission, TurnCoordinator};
use crate::view::BoardView;

/// Owns the whole view side of one game: the engine collaborator, the
/// rendering surface, and the gesture and turn state machines. Built at
/// mount, dropped at unmount.
pub struct BoardController<E, V> {
    engine: E,
    view: V,
    orientation: Orientation,
    grid: SquareGrid,
    renderer: BoardRenderer,
    drag: DragController,
    turn: TurnCoordinator,
}

impl<E: Engine, V: BoardView> BoardController<E, V> {
    /// Builds the controller and paints the opening position. When the human
    /// plays Black the engine owes the game's first move, so exactly one
    /// automated move is applied up front; either way the engine's
    /// legal-move state is refreshed before the human may interact.
    pub fn new(mut engine: E, mut view: V, orientation: Orientation, grid: SquareGrid) -> Self {
        if orientation.is_mirrored() {
            engine.make_ai_move();
        }
        engine.refresh_player_moves();
        let mut renderer = BoardRenderer::new();
        renderer.sync(orientation, &engine, &mut view);
        BoardController {
            engine,
            view,
            orientation,
            grid,
            renderer,
            drag: DragController::new(),
            turn: TurnCoordinator::new(),
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn locked(&self) -> bool {
        self.turn.locked()
    }

    #[inline]
    pub fn dragging(&self) -> bool {
        self.drag.dragging()
    }

    #[inline]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Press at a board-local position: starts a drag when the square under
    /// it holds a rendered piece and no reply is pending. Recovery from a
    /// session orphaned by a missed release event happens first, whether or
    /// not a new drag starts.
    pub fn press(&mut self, at: PointerPos) {
        if self.turn.locked() {
            return;
        }
        self.drag.cancel(&mut self.view);
        let Some(sq) = self.grid.square_at(at) else {
            return;
        };
        let Some(piece) = self.renderer.piece_at(sq) else {
            return;
        };
        self.drag.begin(sq, piece, at, &mut self.view);
    }

    /// Pointer motion: the floating sprite follows. Nothing is resolved to a
    /// square until release.
    pub fn motion(&mut self, at: PointerPos) {
        self.drag.motion(at, &mut self.view);
    }

    /// Release ending a gesture. The drag visuals are reverted before
    /// anything else; a release without a usable position (off-board drop,
    /// multi-touch ending, cancelled touch) then drops the gesture without
    /// consulting the engine. The caller schedules the reply on `Applied`.
    pub fn release(&mut self, at: Option<PointerPos>) -> Submission {
        let Some(source) = self.drag.finish(&mut self.view) else {
            return Submission::Ignored;
        };
        let Some(dest) = at.and_then(|p| self.grid.square_at(p)) else {
            debug!("drag from ({}, {}) dropped off-board", source.row, source.col);
            return Submission::Ignored;
        };
        self.submit_move(source, dest)
    }

    /// Submits a move between two view squares.
    pub fn submit_move(&mut self, from: Square, to: Square) -> Submission {
        self.turn.submit(
            from,
            to,
            self.orientation,
            &mut self.engine,
            &mut self.renderer,
            &mut self.view,
        )
    }

    /// Completes a pending turn: automated reply, render, legal-move
    /// refresh, unlock. The host runs this after the UI pacing delay.
    pub fn complete_reply(&mut self) {
        self.turn.complete_reply(
            self.orientation,
            &mut self.engine,
            &mut self.renderer,
            &mut self.view,
        );
    }

    /// Repaints from engine ground truth. Any transiently wrong square
    /// self-heals here instead of through a dedicated recovery path.
    pub fn sync(&mut self) {
        self.renderer.sync(self.orientation, &self.engine, &mut self.view);
    }
}
