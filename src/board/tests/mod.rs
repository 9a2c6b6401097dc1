//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `legal_moves.rs` - Legal move filtering, pins, castling and en passant
//! - `make_move.rs` - Move application and its side effects
//! - `draw.rs` - Draw rules, checkmate, claims and resignation
//! - `edge_cases.rs` - Special positions and edge cases
//! - `proptest.rs` - Property-based tests over random playouts

use crate::board::{BoardController, Square, SquareSet};

mod draw;

fn controller(fen: &str) -> BoardController {
    BoardController::from_fen(fen).unwrap()
}

fn squares(coords: &[(usize, usize)]) -> SquareSet {
    coords.iter().map(|&(row, col)| Square(row, col)).collect()
}
