//! A chess rule engine.
//!
//! [`board`] holds the rules: position state, move legality, check,
//! checkmate and the draw rules, plus a small material search.
//! [`engine`] runs games between human and computer players on a
//! background turn task.

pub mod board;
pub mod engine;
pub mod sync;

pub use board::{BoardController, Color, MoveRequest, PieceKind, Square};
pub use engine::{GameConfig, GameSession, PlayerKind};
