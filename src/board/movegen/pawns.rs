use super::super::{Color, OccupantLookup, Piece, PieceKind, Square, SquareSet};

/// Pawn destinations: pushes onto empty squares, the double start from an
/// unmoved pawn's starting row, diagonal captures and en passant.
pub(crate) fn pawn_moves(
    pawn: Piece,
    from: Square,
    lookup: &impl OccupantLookup,
    en_passant_target: Option<Square>,
) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    let color = pawn.color;
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if lookup.is_empty(one) {
            moves.insert(one);
            if !pawn.moved && from.row() == color.pawn_start_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if lookup.is_empty(two) {
                        moves.insert(two);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(diag) = from.offset(dir, dc) else {
            continue;
        };
        match lookup.occupant(diag) {
            Some((_, target_color)) if target_color != color => moves.insert(diag),
            None if en_passant_target == Some(diag)
                && is_en_passant_victim(lookup, Square(from.row(), diag.col()), color) =>
            {
                moves.insert(diag);
            }
            _ => {}
        }
    }

    moves
}

/// Squares a pawn controls: both forward diagonals unless an own piece
/// stands there, whether or not they are occupied.
pub(crate) fn pawn_attacks(pawn: Piece, from: Square, lookup: &impl OccupantLookup) -> SquareSet {
    let dir = pawn.color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(|dc| from.offset(dir, dc))
        .filter(|&sq| !matches!(lookup.occupant(sq), Some((_, c)) if c == pawn.color))
        .collect()
}

fn is_en_passant_victim(lookup: &impl OccupantLookup, sq: Square, capturer: Color) -> bool {
    lookup.occupant(sq) == Some((PieceKind::Pawn, capturer.opponent()))
}
