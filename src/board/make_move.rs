//! Move notification and move application.

use super::error::MoveError;
use super::{
    BoardController, CastlingRights, Color, MoveKind, OccupantLookup, Piece, PieceKind, Square,
};

impl Piece {
    /// Tell the piece it is moving from `from` to `to`, marking it moved, and
    /// classify the move so the controller can apply its side effects.
    ///
    /// Rights-breaking kinds take precedence over `SimpleCapture`; captures
    /// are removed by the relocation itself.
    pub fn notify_move(
        &mut self,
        from: Square,
        to: Square,
        lookup: &impl OccupantLookup,
        en_passant_target: Option<Square>,
        castling_rights: CastlingRights,
    ) -> MoveKind {
        self.moved = true;
        let captured = lookup.occupant(to);
        let plain = match captured {
            Some(captured) => MoveKind::SimpleCapture { captured },
            None => MoveKind::SimpleMove,
        };
        let row = self.color.back_row();

        match self.kind {
            PieceKind::Pawn => {
                if from.row().abs_diff(to.row()) == 2 {
                    MoveKind::DoubleStart {
                        en_passant: Square((from.row() + to.row()) / 2, from.col()),
                    }
                } else if captured.is_none()
                    && from.col() != to.col()
                    && en_passant_target == Some(to)
                {
                    MoveKind::EnPassantCapture {
                        captured_at: Square(from.row(), to.col()),
                    }
                } else {
                    plain
                }
            }
            PieceKind::King => match to.col() as isize - from.col() as isize {
                2 => MoveKind::KingsideCastle {
                    rook_from: Square(row, 7),
                    rook_to: Square(row, 5),
                },
                -2 => MoveKind::QueensideCastle {
                    rook_from: Square(row, 0),
                    rook_to: Square(row, 3),
                },
                _ if castling_rights.has_any(self.color) => MoveKind::BreakAllRights,
                _ => plain,
            },
            PieceKind::Rook if from == Square(row, 7) && castling_rights.has(self.color, true) => {
                MoveKind::BreakKingsideRights
            }
            PieceKind::Rook if from == Square(row, 0) && castling_rights.has(self.color, false) => {
                MoveKind::BreakQueensideRights
            }
            _ => plain,
        }
    }
}

impl BoardController {
    /// Apply a move without checking legality.
    ///
    /// Relocates the mover, removes whatever stood on `new`, applies the
    /// notification's side effects and promotes a pawn reaching its last
    /// row (to `promotion`, or a queen when the choice is missing or not a
    /// promotion piece). Afterwards every derived map is recomputed.
    pub fn move_piece(
        &mut self,
        old: Square,
        new: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveKind, MoveError> {
        let Some(mut piece) = self.state.board.piece_at(old) else {
            return Err(MoveError::NoPiece { at: old });
        };
        let color = piece.color;

        if let Some((PieceKind::Rook, captured_color)) = self.piece_info(new) {
            revoke_corner_right(&mut self.state.castling_rights, captured_color, new);
        }

        let kind = piece.notify_move(
            old,
            new,
            &self.state.board,
            self.state.en_passant_target,
            self.state.castling_rights,
        );

        self.state.remove(old);
        self.state.put(new, piece);
        self.state.en_passant_target = None;

        match kind {
            MoveKind::DoubleStart { en_passant } => {
                self.state.en_passant_target = Some(en_passant);
            }
            MoveKind::EnPassantCapture { captured_at } => {
                self.state.remove(captured_at);
            }
            MoveKind::KingsideCastle { rook_from, rook_to }
            | MoveKind::QueensideCastle { rook_from, rook_to } => {
                if let Some(mut rook) = self.state.remove(rook_from) {
                    rook.moved = true;
                    self.state.put(rook_to, rook);
                }
                self.state.castling_rights.remove_color(color);
            }
            MoveKind::BreakKingsideRights => self.state.castling_rights.remove(color, true),
            MoveKind::BreakQueensideRights => self.state.castling_rights.remove(color, false),
            MoveKind::BreakAllRights => self.state.castling_rights.remove_color(color),
            MoveKind::SimpleMove | MoveKind::SimpleCapture { .. } => {}
        }

        if piece.kind == PieceKind::Pawn && new.row() == color.promotion_row() {
            let choice = promotion
                .filter(|&p| self.is_promotion_valid(new, piece.kind, color, p))
                .unwrap_or(PieceKind::Queen);
            piece.kind = choice;
            self.state.put(new, piece);
            log::debug!("{color} pawn promotes to {choice} on {new}");
        }

        self.update_pseudo_legal_moves();
        self.clear_legal_cache();
        log::debug!("{color} {old}{new}: {kind:?}");
        Ok(kind)
    }
}

/// Capturing a rook on its home corner takes away that side's right.
fn revoke_corner_right(rights: &mut CastlingRights, rook_color: Color, at: Square) {
    let row = rook_color.back_row();
    if at == Square(row, 7) {
        rights.remove(rook_color, true);
    } else if at == Square(row, 0) {
        rights.remove(rook_color, false);
    }
}
