//! Material evaluation.

use super::{BoardController, Color, PieceKind};

/// Material weight of a piece kind. The king's weight dwarfs everything
/// else so losing it dominates any trade.
#[inline]
#[must_use]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 4,
        PieceKind::Knight => 7,
        PieceKind::Bishop => 9,
        PieceKind::Rook => 10,
        PieceKind::Queen => 25,
        PieceKind::King => 100_000,
    }
}

/// Material balance from `color`'s point of view.
#[must_use]
pub fn material_score(controller: &BoardController, color: Color) -> i32 {
    let side_total = |side: Color| -> i32 {
        controller
            .state()
            .pieces_of(side)
            .iter()
            .filter_map(|sq| controller.piece_info(sq))
            .map(|(kind, _)| piece_value(kind))
            .sum()
    };
    side_total(color) - side_total(color.opponent())
}
