//! FEN-style position codec.
//!
//! `<8 ranks separated by '/'> <w|b> <KQkq|-> <en passant|-> <halfmove> <fullmove>`,
//! ranks listed from row 0 (rank 8) down to row 7 (rank 1).

use std::str::FromStr;

use super::error::FenError;
use super::state::GameState;
use super::{BoardController, CastlingRights, Color, PieceKind, Square};

/// The standard initial position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a position.
///
/// Rejects input that does not have exactly 8 ranks, whose ranks do not each
/// cover 8 columns, or whose attribute segment does not have exactly 5
/// fields.
pub fn parse(text: &str) -> Result<GameState, FenError> {
    let text = text.trim();
    let (placement, attributes) = text.split_once(' ').unwrap_or((text, ""));

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }
    let fields: Vec<&str> = attributes.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(FenError::WrongAttributeCount {
            found: fields.len(),
        });
    }

    let mut state = GameState::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0;
        for c in rank.chars() {
            if let Some(gap) = c.to_digit(10) {
                col += gap as usize;
                continue;
            }
            let kind = PieceKind::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            if col >= 8 {
                return Err(FenError::WrongFileCount {
                    rank: row,
                    files: col + 1,
                });
            }
            state.place(Square(row, col), kind, color);
            col += 1;
        }
        if col != 8 {
            return Err(FenError::WrongFileCount {
                rank: row,
                files: col,
            });
        }
    }

    let turn = match fields[0] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(FenError::InvalidSideToMove {
                found: other.to_string(),
            })
        }
    };
    state.turn.set(turn);

    state.castling_rights = CastlingRights::from_fen_field(fields[1])
        .map_err(|c| FenError::InvalidCastling { char: c })?;

    state.en_passant_target = match fields[2] {
        "-" => None,
        square => Some(square.parse().map_err(|_| FenError::InvalidEnPassant {
            found: square.to_string(),
        })?),
    };

    state.halfmove_clock = parse_counter(fields[3])?;
    state.fullmove_number = parse_counter(fields[4])?;
    Ok(state)
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field.parse().map_err(|_| FenError::InvalidCounter {
        found: field.to_string(),
    })
}

/// Render a position; the inverse of [`parse`].
#[must_use]
pub fn serialize(state: &GameState) -> String {
    let ranks: Vec<String> = state
        .board()
        .rows()
        .map(|row| {
            let mut rank = String::new();
            let mut empty = 0;
            for square in row {
                match square {
                    Some(piece) => {
                        if empty > 0 {
                            rank.push_str(&empty.to_string());
                            empty = 0;
                        }
                        rank.push(piece.kind.to_fen_char(piece.color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                rank.push_str(&empty.to_string());
            }
            rank
        })
        .collect();

    let en_passant = state
        .en_passant_target()
        .map_or_else(|| "-".to_string(), |sq| sq.to_string());

    format!(
        "{} {} {} {} {} {}",
        ranks.join("/"),
        state.turn().to_fen_char(),
        state.castling_rights(),
        en_passant,
        state.halfmove_clock(),
        state.fullmove_number()
    )
}

pub(crate) fn starting_state() -> GameState {
    match parse(STARTING_FEN) {
        Ok(state) => state,
        Err(err) => unreachable!("starting position must parse: {err}"),
    }
}

impl BoardController {
    /// Build a controller from FEN text.
    pub fn from_fen(text: &str) -> Result<Self, FenError> {
        parse(text).map(BoardController::from_state)
    }

    /// Current position as FEN text
    #[must_use]
    pub fn fen(&self) -> String {
        serialize(&self.state)
    }

    /// Replace the position. The text is fully validated first; on error the
    /// controller is left untouched. Draw tracking and the winner reset.
    pub fn set_fen(&mut self, text: &str) -> Result<(), FenError> {
        let state = parse(text)?;
        *self = BoardController::from_state(state);
        Ok(())
    }
}

impl FromStr for BoardController {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardController::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_round_trip() {
        let state = parse(STARTING_FEN).unwrap();
        assert_eq!(serialize(&state), STARTING_FEN);
        assert_eq!(state.pieces_of(Color::White).len(), 16);
        assert_eq!(state.pieces_of(Color::Black).len(), 16);
        assert_eq!(
            state.board().piece_at(Square(7, 4)).map(|p| p.info()),
            Some((PieceKind::King, Color::White))
        );
        assert_eq!(
            state.board().piece_at(Square(0, 3)).map(|p| p.info()),
            Some((PieceKind::Queen, Color::Black))
        );
    }

    #[test]
    fn test_attributes_parsed() {
        let state = parse("8/8/8/3pP3/8/8/8/8 b Kq d6 12 40").unwrap();
        assert_eq!(state.turn(), Color::Black);
        assert!(state.castling_rights().has(Color::White, true));
        assert!(!state.castling_rights().has(Color::White, false));
        assert!(state.castling_rights().has(Color::Black, false));
        assert_eq!(state.en_passant_target(), Some(Square(2, 3)));
        assert_eq!(state.halfmove_clock(), 12);
        assert_eq!(state.fullmove_number(), 40);
    }

    #[test]
    fn test_moved_flags_from_placement() {
        let state = parse("4k3/8/8/8/8/P7/1P6/R3K2R w KQ - 0 1").unwrap();
        let board = state.board();
        assert!(board.piece_at(Square(5, 0)).unwrap().moved);
        assert!(!board.piece_at(Square(6, 1)).unwrap().moved);
        assert!(!board.piece_at(Square(7, 4)).unwrap().moved);
        assert!(!board.piece_at(Square(7, 7)).unwrap().moved);
        assert!(board.piece_at(Square(0, 4)).unwrap().moved);
    }

    #[test]
    fn test_rank_count_errors() {
        assert_eq!(
            parse("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::WrongRankCount { found: 7 })
        );
        assert_eq!(
            parse("8/8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::WrongRankCount { found: 9 })
        );
    }

    #[test]
    fn test_file_count_errors() {
        assert_eq!(
            parse("7/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::WrongFileCount { rank: 0, files: 7 })
        );
        assert!(matches!(
            parse("8/8/8/8/8/8/8/ppppppppp w - - 0 1"),
            Err(FenError::WrongFileCount { rank: 7, .. })
        ));
        assert!(matches!(
            parse("8/8/8/8/44p/8/8/8 w - - 0 1"),
            Err(FenError::WrongFileCount { rank: 4, .. })
        ));
    }

    #[test]
    fn test_attribute_count_errors() {
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w - - 0"),
            Err(FenError::WrongAttributeCount { found: 4 })
        );
        assert_eq!(
            parse("8/8/8/8/8/8/8/8"),
            Err(FenError::WrongAttributeCount { found: 0 })
        );
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(FenError::WrongAttributeCount { found: 6 })
        );
    }

    #[test]
    fn test_field_errors() {
        assert_eq!(
            parse("8/8/8/8/8/8/8/x7 w - - 0 1"),
            Err(FenError::InvalidPiece { char: 'x' })
        );
        assert!(matches!(
            parse("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w KZ - 0 1"),
            Err(FenError::InvalidCastling { char: 'Z' })
        );
        assert!(matches!(
            parse("8/8/8/8/8/8/8/8 w - e9 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            parse("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(FenError::InvalidCounter { .. })
        ));
    }

    #[test]
    fn test_set_fen_rejects_without_mutating() {
        let mut controller = BoardController::new();
        let before = controller.fen();
        assert!(controller.set_fen("not a position").is_err());
        assert_eq!(controller.fen(), before);

        controller.set_fen("8/8/8/8/8/8/8/K6k b - - 3 9").unwrap();
        assert_eq!(controller.fen(), "8/8/8/8/8/8/8/K6k b - - 3 9");
        assert_eq!(controller.turn(), Color::Black);
    }

    #[test]
    fn test_controller_from_str() {
        let controller: BoardController = STARTING_FEN.parse().unwrap();
        assert_eq!(controller, BoardController::new());
    }
}
