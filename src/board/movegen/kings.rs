use super::super::attack_tables::KING_TARGETS;
use super::super::{CastlingRights, OccupantLookup, Piece, PieceKind, Square, SquareSet};
use super::knights::not_own;

pub(crate) fn king_steps(king: Piece, from: Square, lookup: &impl OccupantLookup) -> SquareSet {
    not_own(KING_TARGETS[from.index()], king.color, lookup)
}

/// Castling destinations for a king, given the opponent's attack map.
///
/// The king must be unmoved on its home square, the right must be held, the
/// own rook must stand in its corner, the squares between must be empty, and
/// neither the king's origin, the square it crosses, nor its destination may
/// be attacked.
pub(crate) fn castling_moves(
    king: Piece,
    from: Square,
    lookup: &impl OccupantLookup,
    rights: CastlingRights,
    enemy_attacks: SquareSet,
) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    let color = king.color;
    let row = color.back_row();
    if king.moved || from != Square(row, 4) {
        return moves;
    }

    let sides: [(bool, usize, &[usize], [usize; 3]); 2] = [
        (true, 7, &[5, 6], [4, 5, 6]),
        (false, 0, &[1, 2, 3], [4, 3, 2]),
    ];
    for (kingside, rook_col, between, king_path) in sides {
        if !rights.has(color, kingside) {
            continue;
        }
        if lookup.occupant(Square(row, rook_col)) != Some((PieceKind::Rook, color)) {
            continue;
        }
        if between.iter().any(|&col| !lookup.is_empty(Square(row, col))) {
            continue;
        }
        if king_path
            .iter()
            .any(|&col| enemy_attacks.contains(Square(row, col)))
        {
            continue;
        }
        moves.insert(Square(row, king_path[2]));
    }
    moves
}
