//! Error types for board operations.

use std::fmt;

use super::Square;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Placement field does not have exactly 8 ranks
    WrongRankCount { found: usize },
    /// A rank's pieces and gaps do not add up to 8 columns
    WrongFileCount { rank: usize, files: usize },
    /// Attribute segment does not have exactly 5 fields
    WrongAttributeCount { found: usize },
    /// Invalid character in a rank
    InvalidPiece { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Halfmove or fullmove field is not a number
    InvalidCounter { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongRankCount { found } => {
                write!(f, "FEN must have 8 ranks, found {found}")
            }
            FenError::WrongFileCount { rank, files } => {
                write!(f, "Rank {rank} covers {files} columns, expected 8")
            }
            FenError::WrongAttributeCount { found } => {
                write!(f, "FEN must have 5 attributes after the ranks, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for rejected move requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Destination is not in the legal-move set of the origin
    InvalidMoveRequest { from: Square, to: Square },
    /// No piece stands on the origin square
    NoPiece { at: Square },
    /// Coordinate notation could not be parsed
    InvalidNotation { notation: String },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidMoveRequest { from, to } => {
                write!(f, "Illegal move {from}{to}")
            }
            MoveError::NoPiece { at } => write!(f, "No piece on {at}"),
            MoveError::InvalidNotation { notation } => {
                write!(f, "Invalid move notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Row out of bounds (must be 0-7)
    RowOutOfBounds { row: usize },
    /// Column out of bounds (must be 0-7)
    ColOutOfBounds { col: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RowOutOfBounds { row } => {
                write!(f, "Row {row} out of bounds (must be 0-7)")
            }
            SquareError::ColOutOfBounds { col } => {
                write!(f, "Column {col} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}
