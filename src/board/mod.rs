//! Chess board representation and rules.
//!
//! The [`BoardController`] owns a position and answers every rule
//! question: legal moves (with check, castling, en passant and
//! promotion), check and checkmate, and the draw rules.
//!
//! # Example
//! ```
//! use chess_rules::board::{BoardController, Square};
//!
//! let mut controller = BoardController::new();
//! let knight_moves = controller.get_legal_moves(Square(7, 1));
//! assert_eq!(knight_moves.len(), 2);
//! ```

mod attack_tables;
mod builder;
mod controller;
mod draw;
mod error;
pub mod eval;
pub mod fen;
mod make_move;
mod movegen;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::BoardBuilder;
pub use controller::{BoardController, GameOutcome};
pub use draw::DrawReason;
pub use error::{FenError, MoveError, SquareError};
pub use fen::STARTING_FEN;
pub use search::SearchResult;
pub use state::{Board, GameState, OccupantLookup};
pub use types::{
    CastlingRights, Color, MoveKind, MoveRequest, Piece, PieceKind, Square, SquareSet,
    SquareSetIter,
};

pub(crate) use types::PROMOTION_PIECES;
