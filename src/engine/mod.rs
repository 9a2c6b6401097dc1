//! Running games: configuration, players and the threaded session.
//!
//! A [`GameSession`] owns the position behind a lock and drives one
//! background turn task at a time. Each turn the task snapshots the
//! position, asks the side to move's [`Player`] for a move, and applies it.
//! Human moves arrive through [`GameSession::submit_move`].

mod config;
mod error;
mod player;
mod session;

pub use config::{GameConfig, PlayerKind, DEFAULT_SEARCH_DEPTH};
pub use error::SessionError;
pub use player::{build_player, HumanPlayer, MinimaxPlayer, Player, RandomPlayer, TurnContext};
pub use session::{GameSession, SessionStatus};
