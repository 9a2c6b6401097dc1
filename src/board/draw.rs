//! Draw rules: fifty-move, repetition, insufficient material, stalemate.

use std::collections::VecDeque;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{BoardController, Color, PieceKind, Square};

/// Plies without a pawn move or capture before a draw may be claimed
pub(crate) const FIFTY_MOVE_PLIES: i32 = 100;

/// Destinations kept per color before the repetition pattern is checked
const REPETITION_WINDOW: usize = 5;

/// Back-and-forth moves needed before the repetition pattern counts
const MIN_OSCILLATIONS: u32 = 5;

/// Why a game ended drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        };
        f.write_str(text)
    }
}

/// One color's recent moves, as seen by the repetition heuristic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RepetitionWindow {
    pub(crate) last_moved: Option<PieceKind>,
    pub(crate) last_move: Option<(Square, Square)>,
    pub(crate) oscillations: u32,
    pub(crate) destinations: VecDeque<Square>,
}

impl Default for RepetitionWindow {
    fn default() -> Self {
        RepetitionWindow {
            last_moved: None,
            last_move: None,
            oscillations: 1,
            destinations: VecDeque::with_capacity(REPETITION_WINDOW),
        }
    }
}

impl RepetitionWindow {
    /// Record a move and report whether the window shows a repetition.
    ///
    /// `None` means the window is not full yet and the shared flag should be
    /// left alone.
    fn record(&mut self, kind: PieceKind, old: Square, new: Square) -> Option<bool> {
        if let (Some(prev_kind), Some((prev_old, prev_new))) = (self.last_moved, self.last_move) {
            if prev_kind == kind && prev_old == new && prev_new == old {
                self.oscillations += 1;
            } else {
                self.oscillations = 1;
            }
        }
        self.last_moved = Some(kind);
        self.last_move = Some((old, new));

        self.destinations.push_back(new);
        if self.destinations.len() < REPETITION_WINDOW {
            return None;
        }
        let w = &self.destinations;
        let repeated = self.oscillations >= MIN_OSCILLATIONS
            && w[0] == w[2]
            && w[2] == w[4]
            && w[1] == w[3];
        self.destinations.pop_front();
        Some(repeated)
    }
}

/// Draw bookkeeping carried by the controller and copied with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DrawTracker {
    pub(crate) fifty_move_counter: i32,
    pub(crate) claim_draw: bool,
    pub(crate) threefold_draw: bool,
    pub(crate) insufficient_material: bool,
    pub(crate) stalemate: bool,
    pub(crate) claimed: Option<DrawReason>,
    pub(crate) windows: [RepetitionWindow; 2],
}

impl Default for DrawTracker {
    fn default() -> Self {
        DrawTracker {
            fifty_move_counter: FIFTY_MOVE_PLIES,
            claim_draw: false,
            threefold_draw: false,
            insufficient_material: false,
            stalemate: false,
            claimed: None,
            windows: Default::default(),
        }
    }
}

impl BoardController {
    /// Count down toward a claimable fifty-move draw. Call before the move
    /// is applied: a pawn mover or an occupied destination resets the count.
    pub fn fifty_move_rule(&mut self, old: Square, new: Square) {
        let pawn_move = matches!(self.piece_info(old), Some((PieceKind::Pawn, _)));
        let capture = self.piece_info(new).is_some();
        if pawn_move || capture {
            self.draws.fifty_move_counter = FIFTY_MOVE_PLIES;
            self.draws.claim_draw = false;
            return;
        }
        self.draws.fifty_move_counter -= 1;
        if self.draws.fifty_move_counter <= 0 {
            self.draws.claim_draw = true;
        }
    }

    /// Update the repetition heuristic with a move that has just been
    /// applied; the mover now stands on `new`.
    ///
    /// The heuristic looks for one piece shuttling between two squares: at
    /// least five consecutive reversals with the last five destinations
    /// alternating. It is a claimable draw, not an automatic one.
    pub fn threefold_repetition_rule(&mut self, old: Square, new: Square) {
        let Some((kind, color)) = self.piece_info(new) else {
            return;
        };
        if let Some(repeated) = self.draws.windows[color.index()].record(kind, old, new) {
            self.draws.threefold_draw = repeated;
        }
    }

    /// Flag a dead position. Covers K v K, K+B v K, K+N v K, K+N+N v K and
    /// K+B v K+B with both bishops on the same square color. The flag never
    /// clears once set.
    pub fn insufficient_material_rule(&mut self) -> bool {
        if self.draws.insufficient_material {
            return true;
        }
        let (Some(white), Some(black)) = (
            self.minor_material(Color::White),
            self.minor_material(Color::Black),
        ) else {
            return false;
        };
        let dead = match (white.as_slice(), black.as_slice()) {
            ([], []) => true,
            ([(PieceKind::Bishop, _)], []) | ([], [(PieceKind::Bishop, _)]) => true,
            ([(PieceKind::Knight, _)], []) | ([], [(PieceKind::Knight, _)]) => true,
            ([(PieceKind::Knight, _), (PieceKind::Knight, _)], [])
            | ([], [(PieceKind::Knight, _), (PieceKind::Knight, _)]) => true,
            ([(PieceKind::Bishop, w)], [(PieceKind::Bishop, b)]) => w.is_even() == b.is_even(),
            _ => false,
        };
        if dead {
            log::info!("Insufficient material, game drawn");
            self.draws.insufficient_material = true;
        }
        dead
    }

    /// A color's pieces besides its king, or `None` when it has no king or
    /// more than two other pieces.
    fn minor_material(&self, color: Color) -> Option<Vec<(PieceKind, Square)>> {
        let pieces = self.state.pieces_of(color);
        if pieces.len() > 3 {
            return None;
        }
        self.state.king_square(color)?;
        Some(
            pieces
                .iter()
                .filter_map(|sq| self.piece_info(sq).map(|(kind, _)| (kind, sq)))
                .filter(|&(kind, _)| kind != PieceKind::King)
                .collect(),
        )
    }

    /// Stalemate for the side to move: no legal move and not in check.
    pub fn stalemate_rule(&mut self) -> bool {
        let turn = self.turn();
        if !self.is_in_check(turn) && !self.has_any_legal_move(turn) {
            log::info!("{turn} is stalemated, game drawn");
            self.draws.stalemate = true;
        }
        self.draws.stalemate
    }

    #[must_use]
    pub fn claim_draw(&self) -> bool {
        self.draws.claim_draw
    }

    #[must_use]
    pub fn threefold_draw(&self) -> bool {
        self.draws.threefold_draw
    }

    #[must_use]
    pub fn insufficient_material_draw(&self) -> bool {
        self.draws.insufficient_material
    }

    #[must_use]
    pub fn stalemate_draw(&self) -> bool {
        self.draws.stalemate
    }

    /// Plies left before a fifty-move draw may be claimed
    #[must_use]
    pub fn fifty_move_counter(&self) -> i32 {
        self.draws.fifty_move_counter
    }

    /// Draw reason a claim would succeed with right now, if any
    #[must_use]
    pub fn claimable_draw(&self) -> Option<DrawReason> {
        if self.draws.threefold_draw {
            Some(DrawReason::ThreefoldRepetition)
        } else if self.draws.claim_draw {
            Some(DrawReason::FiftyMoveRule)
        } else {
            None
        }
    }

    /// End the game as a claimed draw. Returns the reason, or `None` when
    /// neither claimable rule currently holds.
    pub fn accept_draw_claim(&mut self) -> Option<DrawReason> {
        let reason = self.claimable_draw()?;
        log::info!("Draw claimed by {reason}");
        self.draws.claimed = Some(reason);
        Some(reason)
    }
}
