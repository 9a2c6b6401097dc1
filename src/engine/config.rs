//! Game configuration.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::SessionError;
use crate::board::{fen, Color, STARTING_FEN};

/// Default minimax depth in plies
pub const DEFAULT_SEARCH_DEPTH: u32 = 2;

/// Who makes the moves for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlayerKind {
    /// Moves arrive through `GameSession::submit_move`
    #[default]
    Human,
    /// Uniformly random legal moves
    Random,
    /// Fixed-depth material minimax
    Minimax,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerKind::Human => "human",
            PlayerKind::Random => "random",
            PlayerKind::Minimax => "minimax",
        };
        f.write_str(name)
    }
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "random" => Ok(PlayerKind::Random),
            "minimax" | "ai" => Ok(PlayerKind::Minimax),
            other => Err(format!("unknown player kind '{other}'")),
        }
    }
}

/// Everything needed to start a game, passed once at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameConfig {
    pub starting_fen: String,
    pub white: PlayerKind,
    pub black: PlayerKind,
    /// Plies the minimax player looks ahead
    pub search_depth: u32,
    /// Seed for the random player; `None` seeds from entropy
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            starting_fen: STARTING_FEN.to_string(),
            white: PlayerKind::Human,
            black: PlayerKind::Minimax,
            search_depth: DEFAULT_SEARCH_DEPTH,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fen(mut self, fen: impl Into<String>) -> Self {
        self.starting_fen = fen.into();
        self
    }

    #[must_use]
    pub fn with_players(mut self, white: PlayerKind, black: PlayerKind) -> Self {
        self.white = white;
        self.black = black;
        self
    }

    #[must_use]
    pub fn with_search_depth(mut self, depth: u32) -> Self {
        self.search_depth = depth;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn player(&self, color: Color) -> PlayerKind {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Check the depth is at least one ply and the starting position parses.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.search_depth == 0 {
            return Err(SessionError::InvalidDepth);
        }
        fen::parse(&self.starting_fen).map_err(SessionError::Fen)?;
        Ok(())
    }
}
