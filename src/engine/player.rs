//! Move sources: humans on a channel, a random mover, and minimax.

use std::sync::mpsc::Receiver;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::config::{GameConfig, PlayerKind};
use crate::board::{search, BoardController, Color, MoveRequest, PieceKind, PROMOTION_PIECES};
use crate::sync::StopFlag;

/// What a player sees when asked for a move.
pub struct TurnContext {
    pub color: Color,
    /// Owned snapshot of the position; changes are never applied back
    pub position: BoardController,
    /// Moves submitted by a human for this turn
    pub requests: Receiver<MoveRequest>,
    pub stop: StopFlag,
}

/// A source of moves for one side.
///
/// `choose_move` may block. Returning `None` means the turn was cancelled
/// (paused, stopped, or no move available) and the turn task exits.
pub trait Player: Send + Sync {
    fn choose_move(&self, ctx: &mut TurnContext) -> Option<MoveRequest>;

    fn kind(&self) -> PlayerKind;
}

/// Waits for a move on the turn channel.
#[derive(Debug, Default)]
pub struct HumanPlayer;

impl Player for HumanPlayer {
    fn choose_move(&self, ctx: &mut TurnContext) -> Option<MoveRequest> {
        // The sender is dropped on pause, which ends the wait
        let request = ctx.requests.recv().ok()?;
        (!ctx.stop.is_stopped()).then_some(request)
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }
}

/// Picks a legal move uniformly at random, with a random promotion choice.
#[derive(Debug)]
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomPlayer {
            rng: Mutex::new(rng),
        }
    }
}

impl Player for RandomPlayer {
    fn choose_move(&self, ctx: &mut TurnContext) -> Option<MoveRequest> {
        if ctx.stop.is_stopped() {
            return None;
        }
        let moves: Vec<MoveRequest> = ctx
            .position
            .legal_move_requests(ctx.color)
            .into_iter()
            .filter(|m| m.promotion.map_or(true, |p| p == PieceKind::Queen))
            .collect();
        let mut rng = self.rng.lock();
        let mut choice = *moves.choose(&mut *rng)?;
        if choice.promotion.is_some() {
            choice.promotion = Some(PROMOTION_PIECES[rng.gen_range(0..PROMOTION_PIECES.len())]);
        }
        Some(choice)
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Random
    }
}

/// Fixed-depth material minimax.
#[derive(Debug)]
pub struct MinimaxPlayer {
    depth: u32,
}

impl MinimaxPlayer {
    #[must_use]
    pub fn new(depth: u32) -> Self {
        MinimaxPlayer { depth }
    }
}

impl Player for MinimaxPlayer {
    fn choose_move(&self, ctx: &mut TurnContext) -> Option<MoveRequest> {
        search::minimax(&ctx.position, ctx.color, self.depth, &ctx.stop)?.best_move
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Minimax
    }
}

/// Build the player configured for `color`.
#[must_use]
pub fn build_player(config: &GameConfig, color: Color) -> Box<dyn Player> {
    match config.player(color) {
        PlayerKind::Human => Box::new(HumanPlayer),
        PlayerKind::Random => {
            // Distinct streams per side from one seed
            let seed = config.rng_seed.map(|s| s.wrapping_add(color.index() as u64));
            Box::new(RandomPlayer::new(seed))
        }
        PlayerKind::Minimax => Box::new(MinimaxPlayer::new(config.search_depth)),
    }
}
