use super::super::attack_tables::KNIGHT_TARGETS;
use super::super::{Color, OccupantLookup, Square, SquareSet};

pub(crate) fn knight_moves(color: Color, from: Square, lookup: &impl OccupantLookup) -> SquareSet {
    not_own(KNIGHT_TARGETS[from.index()], color, lookup)
}

/// Drop targets occupied by a piece of `color`.
pub(super) fn not_own(targets: SquareSet, color: Color, lookup: &impl OccupantLookup) -> SquareSet {
    targets
        .iter()
        .filter(|&sq| !matches!(lookup.occupant(sq), Some((_, c)) if c == color))
        .collect()
}
