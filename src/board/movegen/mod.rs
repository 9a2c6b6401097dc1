//! Pseudo-legal move generation per piece kind.
//!
//! Generation here ignores whether the mover's own king ends up attacked;
//! the controller filters that by simulating each candidate on a clone.

mod kings;
mod knights;
mod pawns;
mod sliders;

pub(crate) use kings::castling_moves;

use super::{OccupantLookup, Piece, PieceKind, Square, SquareSet};
use sliders::SliderType;

impl Piece {
    /// Destinations this piece may reach from `from`, castling excluded.
    #[must_use]
    pub fn pseudo_legal_moves(
        &self,
        from: Square,
        lookup: &impl OccupantLookup,
        en_passant_target: Option<Square>,
    ) -> SquareSet {
        match self.kind {
            PieceKind::Pawn => pawns::pawn_moves(*self, from, lookup, en_passant_target),
            PieceKind::Knight => knights::knight_moves(self.color, from, lookup),
            PieceKind::Bishop => sliders::slider_moves(SliderType::Bishop, self.color, from, lookup),
            PieceKind::Rook => sliders::slider_moves(SliderType::Rook, self.color, from, lookup),
            PieceKind::Queen => sliders::slider_moves(SliderType::Queen, self.color, from, lookup),
            PieceKind::King => kings::king_steps(*self, from, lookup),
        }
    }

    /// Squares this piece controls, the contribution to its color's attack
    /// map. Identical to the pseudo-legal set except for pawns, which
    /// control both forward diagonals and never attack by pushing.
    #[must_use]
    pub fn attacks(&self, from: Square, lookup: &impl OccupantLookup) -> SquareSet {
        match self.kind {
            PieceKind::Pawn => pawns::pawn_attacks(*self, from, lookup),
            _ => self.pseudo_legal_moves(from, lookup, None),
        }
    }
}
