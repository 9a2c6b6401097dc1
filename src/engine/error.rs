//! Error types for game sessions.

use std::fmt;
use std::io;

use crate::board::{FenError, MoveError};

/// Error type for session control failures
#[derive(Debug)]
pub enum SessionError {
    /// A turn task is already running
    AlreadyRunning,
    /// No turn task is running
    NotRunning,
    /// The game already has an outcome
    GameOver,
    /// No human player is waiting for a move
    NoPendingTurn,
    /// Neither the fifty-move nor the repetition rule currently holds
    DrawNotClaimable,
    /// Search depth must be at least one ply
    InvalidDepth,
    /// Starting position did not parse
    Fen(FenError),
    /// Submitted move was rejected
    Move(MoveError),
    /// The turn task could not be started
    Spawn(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AlreadyRunning => write!(f, "Game is already running"),
            SessionError::NotRunning => write!(f, "Game is not running"),
            SessionError::GameOver => write!(f, "Game is over"),
            SessionError::NoPendingTurn => write!(f, "No human player is waiting for a move"),
            SessionError::DrawNotClaimable => write!(f, "No draw can be claimed now"),
            SessionError::InvalidDepth => write!(f, "Search depth must be at least 1"),
            SessionError::Fen(err) => write!(f, "Invalid starting position: {err}"),
            SessionError::Move(err) => write!(f, "{err}"),
            SessionError::Spawn(err) => write!(f, "Failed to start turn task: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Fen(err) => Some(err),
            SessionError::Move(err) => Some(err),
            SessionError::Spawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FenError> for SessionError {
    fn from(err: FenError) -> Self {
        SessionError::Fen(err)
    }
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Move(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn test_session_error_display() {
        assert!(SessionError::GameOver.to_string().contains("over"));
        let err = SessionError::from(MoveError::InvalidMoveRequest {
            from: Square(6, 4),
            to: Square(3, 4),
        });
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_session_error_source() {
        use std::error::Error;
        let err = SessionError::from(FenError::WrongRankCount { found: 3 });
        assert!(err.source().is_some());
        assert!(SessionError::NotRunning.source().is_none());
    }
}
