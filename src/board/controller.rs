//! The board controller: owns the game state and answers rule questions.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::draw::{DrawReason, DrawTracker};
use super::error::MoveError;
use super::movegen::castling_moves;
use super::state::GameState;
use super::{fen, Color, MoveKind, MoveRequest, PieceKind, Square, SquareSet, PROMOTION_PIECES};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameOutcome {
    Winner(Color),
    Draw(DrawReason),
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Winner(color) => write!(f, "{color} wins"),
            GameOutcome::Draw(reason) => write!(f, "Draw by {reason}"),
        }
    }
}

/// Game state plus the derived move and attack maps.
///
/// Every mutation recomputes the per-square pseudo-legal sets and both
/// attack maps, and clears the legal-move memo. Cloning produces a fully
/// independent copy, which is how hypothetical moves are evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardController {
    pub(crate) state: GameState,
    pub(crate) pseudo_legal: [SquareSet; 64],
    pub(crate) attackable_tiles_from: [SquareSet; 2],
    pub(crate) draws: DrawTracker,
    pub(crate) winner: Option<Color>,
    pub(crate) legal_cache: [Option<SquareSet>; 64],
}

impl Default for BoardController {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardController {
    /// Controller for the standard starting position
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(fen::starting_state())
    }

    /// Wrap a parsed state and compute its move and attack maps
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        let mut controller = BoardController {
            state,
            pseudo_legal: [SquareSet::EMPTY; 64],
            attackable_tiles_from: [SquareSet::EMPTY; 2],
            draws: DrawTracker::default(),
            winner: None,
            legal_cache: [None; 64],
        };
        controller.update_pseudo_legal_moves();
        controller
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn piece_info(&self, pos: Square) -> Option<(PieceKind, Color)> {
        self.state.board.piece_at(pos).map(|p| p.info())
    }

    #[inline]
    #[must_use]
    pub fn turn(&self) -> Color {
        self.state.turn()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Pseudo-legal destinations from `pos`, own-king exposure ignored
    #[inline]
    #[must_use]
    pub fn pseudo_legal_moves(&self, pos: Square) -> SquareSet {
        self.pseudo_legal[pos.index()]
    }

    /// Squares controlled by `color`'s pieces
    #[inline]
    #[must_use]
    pub fn attackable_tiles_from(&self, color: Color) -> SquareSet {
        self.attackable_tiles_from[color.index()]
    }

    /// Recompute every pseudo-legal set and both attack maps.
    ///
    /// Castling depends on the opponent's attack map, so it is added in a
    /// second pass once both maps are known.
    pub(crate) fn update_pseudo_legal_moves(&mut self) {
        self.pseudo_legal = [SquareSet::EMPTY; 64];
        self.attackable_tiles_from = [SquareSet::EMPTY; 2];
        let board = &self.state.board;
        let en_passant = self.state.en_passant_target;

        for color in Color::BOTH {
            for sq in self.state.pieces_of(color) {
                let Some(piece) = board.piece_at(sq) else {
                    continue;
                };
                self.pseudo_legal[sq.index()] = piece.pseudo_legal_moves(sq, board, en_passant);
                let attacks = piece.attacks(sq, board);
                let map = &mut self.attackable_tiles_from[color.index()];
                *map = map.union(attacks);
            }
        }

        for color in Color::BOTH {
            let Some(king_sq) = self.state.king_square(color) else {
                continue;
            };
            let Some(king) = board.piece_at(king_sq) else {
                continue;
            };
            let castles = castling_moves(
                king,
                king_sq,
                board,
                self.state.castling_rights,
                self.attackable_tiles_from(color.opponent()),
            );
            let moves = &mut self.pseudo_legal[king_sq.index()];
            *moves = moves.union(castles);
        }
    }

    #[inline]
    pub(crate) fn clear_legal_cache(&mut self) {
        self.legal_cache = [None; 64];
    }

    /// Legal destinations for the piece on `pos`, regardless of whose turn
    /// it is. Empty for an empty square.
    ///
    /// Each pseudo-legal destination is played on a clone and kept only if
    /// the mover's king is not attacked afterwards. Results are memoized
    /// until the next mutation.
    pub fn get_legal_moves(&mut self, pos: Square) -> SquareSet {
        if let Some(cached) = self.legal_cache[pos.index()] {
            return cached;
        }
        let Some((kind, color)) = self.piece_info(pos) else {
            return SquareSet::EMPTY;
        };
        let pseudo = self.pseudo_legal_moves(pos);
        let legal = if self.state.king_square(color).is_none() {
            pseudo
        } else {
            pseudo
                .iter()
                .filter(|&to| {
                    promotion_representatives(kind, color, to)
                        .iter()
                        .any(|&promotion| self.keeps_king_safe(pos, to, promotion))
                })
                .collect()
        };
        self.legal_cache[pos.index()] = Some(legal);
        legal
    }

    fn keeps_king_safe(&self, from: Square, to: Square, promotion: PieceKind) -> bool {
        let Some((_, color)) = self.piece_info(from) else {
            return false;
        };
        let mut child = self.clone();
        if child.move_piece(from, to, Some(promotion)).is_err() {
            return false;
        }
        !child.is_in_check(color)
    }

    /// Apply `request` only if it is legal for the piece on its origin.
    pub fn try_move(&mut self, request: MoveRequest) -> Result<MoveKind, MoveError> {
        self.validate(request)?;
        self.move_piece(request.from, request.to, request.promotion)
    }

    fn validate(&mut self, request: MoveRequest) -> Result<(), MoveError> {
        if self.piece_info(request.from).is_none() {
            return Err(MoveError::NoPiece { at: request.from });
        }
        if !self.get_legal_moves(request.from).contains(request.to) {
            return Err(MoveError::InvalidMoveRequest {
                from: request.from,
                to: request.to,
            });
        }
        Ok(())
    }

    /// Whether the piece on `pos` attacks the opposing king.
    #[must_use]
    pub fn is_check(&self, pos: Square) -> bool {
        let Some(piece) = self.state.board.piece_at(pos) else {
            return false;
        };
        self.state
            .king_square(piece.color.opponent())
            .is_some_and(|king| piece.attacks(pos, &self.state.board).contains(king))
    }

    /// Whether `color`'s king stands on a square the opponent attacks
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.state
            .king_square(color)
            .is_some_and(|king| self.attackable_tiles_from(color.opponent()).contains(king))
    }

    pub fn has_any_legal_move(&mut self, color: Color) -> bool {
        let pieces = self.state.pieces_of(color);
        pieces.iter().any(|sq| !self.get_legal_moves(sq).is_empty())
    }

    /// Whether the color opposing the piece on `pos` is checkmated. On mate
    /// the piece's color is recorded as the winner.
    pub fn is_checkmate(&mut self, pos: Square) -> bool {
        let Some((_, color)) = self.piece_info(pos) else {
            return false;
        };
        let defender = color.opponent();
        if self.is_in_check(defender) && !self.has_any_legal_move(defender) {
            log::info!("{defender} is checkmated, {color} wins");
            self.winner = Some(color);
            return true;
        }
        false
    }

    /// Hand the move to the other side.
    pub fn finish_turn(&mut self) {
        {
            let mut turn = self.state.turn.lock();
            if *turn == Color::Black {
                self.state.fullmove_number += 1;
            }
            *turn = turn.opponent();
            log::debug!("Turn passes to {}", *turn);
        }
        self.state.halfmove_clock += 1;
        self.clear_legal_cache();
    }

    /// Whether `promotion` is an allowed choice for a piece of `kind` and
    /// `color` standing on `pos`.
    #[must_use]
    pub fn is_promotion_valid(
        &self,
        pos: Square,
        kind: PieceKind,
        color: Color,
        promotion: PieceKind,
    ) -> bool {
        promotion.is_promotion_choice()
            && kind == PieceKind::Pawn
            && pos.row() == color.promotion_row()
    }

    /// One full turn: validate, apply, evaluate every rule, flip the turn.
    pub fn play_turn(&mut self, request: MoveRequest) -> Result<MoveKind, MoveError> {
        self.validate(request)?;
        let MoveRequest { from, to, promotion } = request;
        self.fifty_move_rule(from, to);
        let kind = self.move_piece(from, to, promotion)?;
        self.threefold_repetition_rule(from, to);
        self.is_checkmate(to);
        self.insufficient_material_rule();
        self.finish_turn();
        self.stalemate_rule();
        Ok(kind)
    }

    /// Every legal move of `color`, promotions expanded to all four choices.
    pub fn legal_move_requests(&mut self, color: Color) -> Vec<MoveRequest> {
        let mut requests = Vec::new();
        for from in self.state.pieces_of(color) {
            let Some((kind, _)) = self.piece_info(from) else {
                continue;
            };
            for to in self.get_legal_moves(from) {
                if kind == PieceKind::Pawn && to.row() == color.promotion_row() {
                    requests.extend(
                        PROMOTION_PIECES
                            .iter()
                            .map(|&p| MoveRequest::with_promotion(from, to, p)),
                    );
                } else {
                    requests.push(MoveRequest::new(from, to));
                }
            }
        }
        requests
    }

    /// Evaluate the terminal rules for the side to move without a move having
    /// been played, as needed for a freshly loaded position.
    pub fn update_terminal_state(&mut self) {
        let turn = self.turn();
        if self.is_in_check(turn) && !self.has_any_legal_move(turn) {
            self.winner = Some(turn.opponent());
        }
        self.insufficient_material_rule();
        self.stalemate_rule();
    }

    /// The side to move gives up; the opponent wins.
    pub fn resign(&mut self, color: Color) {
        log::info!("{color} resigns");
        self.winner = Some(color.opponent());
    }

    /// Terminal state reached so far, if any
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        if let Some(color) = self.winner {
            return Some(GameOutcome::Winner(color));
        }
        if self.draws.stalemate {
            return Some(GameOutcome::Draw(DrawReason::Stalemate));
        }
        if self.draws.insufficient_material {
            return Some(GameOutcome::Draw(DrawReason::InsufficientMaterial));
        }
        self.draws.claimed.map(GameOutcome::Draw)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }
}

/// Promotion choices worth simulating for a move: a queen stands in for
/// every non-promoting move, the knight is added on the last rank since it
/// covers squares a queen cannot.
fn promotion_representatives(kind: PieceKind, color: Color, to: Square) -> &'static [PieceKind] {
    if kind == PieceKind::Pawn && to.row() == color.promotion_row() {
        &[PieceKind::Queen, PieceKind::Knight]
    } else {
        &[PieceKind::Queen]
    }
}
