use once_cell::sync::Lazy;

use super::{Square, SquareSet};

pub(crate) const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub(crate) const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const ORTHOGONAL_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) const DIAGONAL_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn offset_table(deltas: &[(isize, isize)]) -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    for (idx, targets) in table.iter_mut().enumerate() {
        let from = Square::from_index(idx);
        *targets = deltas
            .iter()
            .filter_map(|&(dr, dc)| from.offset(dr, dc))
            .collect();
    }
    table
}

/// Knight destinations per square, ignoring occupancy
pub(crate) static KNIGHT_TARGETS: Lazy<[SquareSet; 64]> = Lazy::new(|| offset_table(&KNIGHT_DELTAS));

/// King destinations per square, ignoring occupancy and castling
pub(crate) static KING_TARGETS: Lazy<[SquareSet; 64]> = Lazy::new(|| offset_table(&KING_DELTAS));
