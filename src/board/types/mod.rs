//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `PieceKind`, `Color` and `Piece` - piece kinds, colors and board occupants
//! - `Square` - (row, col) board coordinate, row 0 = rank 8
//! - `SquareSet` - 64-bit set of squares
//! - `MoveKind` and `MoveRequest` - move notifications and submitted moves
//! - `CastlingRights` - castling state

mod castling;
mod moves;
mod piece;
mod square;
mod square_set;

pub use castling::CastlingRights;
pub use moves::{MoveKind, MoveRequest};
pub use piece::{Color, Piece, PieceKind};
pub use square::Square;
pub use square_set::{SquareSet, SquareSetIter};

pub(crate) use piece::PROMOTION_PIECES;
