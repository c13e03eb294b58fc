//! Chess board view in Rust → WebAssembly.
//!
//! The move-validating engine stays an external collaborator behind the
//! [`engine::Engine`] trait; this crate owns everything between the pointer
//! and that engine:
//!
//! - An 8×8 DOM grid of piece sprites with diff-driven minimal repainting.
//! - Mouse and single-finger touch drag gestures.
//! - Board orientation: the human's color always starts at the bottom edge.
//! - Turn pacing: human move, short pause, automated reply, with the board
//!   locked in between.
//!
//! Host pages call [`web::mount_board`] with an engine object and a map of
//! sprite urls; the board mounts into a supplied container element and
//! detaches on [`web::BoardHandle::unmount`]. The core is DOM-free and runs
//! under plain `cargo test` against scripted fakes.

pub mod controller;
pub mod drag;
pub mod engine;
pub mod geometry;
pub mod render;
pub mod turn;
pub mod view;
pub mod web;

#[cfg(test)]
mod testkit;

pub use controller::BoardController;
pub use engine::{Engine, Piece, PieceCode, PieceColor, PieceKind};
pub use geometry::{Orientation, PointerPos, Square, SquareGrid};
pub use render::BoardRenderer;
pub use turn::Submission;
pub use view::BoardView;
