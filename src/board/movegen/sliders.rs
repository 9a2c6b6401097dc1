use super::super::attack_tables::{DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS};
use super::super::{Color, OccupantLookup, Square, SquareSet};

/// Type of sliding piece for move generation
#[derive(Clone, Copy)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl SliderType {
    fn directions(self) -> &'static [[(isize, isize); 4]] {
        match self {
            SliderType::Bishop => &[DIAGONAL_DIRECTIONS],
            SliderType::Rook => &[ORTHOGONAL_DIRECTIONS],
            SliderType::Queen => &[DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS],
        }
    }
}

/// Cast rays until the edge or the first occupant; the occupant's square is
/// included only when it holds an enemy piece.
pub(crate) fn slider_moves(
    slider: SliderType,
    color: Color,
    from: Square,
    lookup: &impl OccupantLookup,
) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    for &(dr, dc) in slider.directions().iter().flatten() {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match lookup.occupant(next) {
                None => moves.insert(next),
                Some((_, c)) => {
                    if c != color {
                        moves.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    moves
}
