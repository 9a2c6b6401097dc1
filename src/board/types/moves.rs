//! Move notifications and move requests.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, PieceKind};
use super::square::Square;
use crate::board::error::MoveError;

/// What a move does to the board beyond relocating the mover.
///
/// Returned by `notify_move`; the controller applies the side effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    SimpleMove,
    SimpleCapture { captured: (PieceKind, Color) },
    /// Pawn advanced two squares; `en_passant` is the skipped square.
    DoubleStart { en_passant: Square },
    /// The captured pawn stands at `captured_at`, not on the destination.
    EnPassantCapture { captured_at: Square },
    KingsideCastle { rook_from: Square, rook_to: Square },
    QueensideCastle { rook_from: Square, rook_to: Square },
    BreakKingsideRights,
    BreakQueensideRights,
    BreakAllRights,
}

impl MoveKind {
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::SimpleCapture { .. } | MoveKind::EnPassantCapture { .. }
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        matches!(
            self,
            MoveKind::KingsideCastle { .. } | MoveKind::QueensideCastle { .. }
        )
    }
}

/// A move as submitted by a player: origin, destination and an optional
/// promotion choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        MoveRequest {
            from,
            to,
            promotion: None,
        }
    }

    #[must_use]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        MoveRequest {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for MoveRequest {
    type Err = MoveError;

    /// Parse coordinate notation such as `e2e4` or `e7e8q`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoveError::InvalidNotation {
            notation: s.to_string(),
        };
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }
        let from: Square = s[0..2].parse().map_err(|_| invalid())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid())?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind) if kind.is_promotion_choice() => Some(kind),
                _ => return Err(invalid()),
            },
        };
        Ok(MoveRequest {
            from,
            to,
            promotion,
        })
    }
}
