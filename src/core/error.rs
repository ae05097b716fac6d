//! Errors returned by rejected commands.
//!
//! Every variant is a caller mistake. A rejected command leaves the game
//! exactly as it was, so callers can report the error and carry on.

use thiserror::Error;

use super::player::PlayerId;
use super::state::Phase;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot {command} during the {phase} phase")]
    InvalidPhase { command: &'static str, phase: Phase },
    #[error("category {category:?} is not available")]
    InvalidCategory { category: String },
    #[error("die position {position} is out of range (expected 0..=4)")]
    InvalidDiePosition { position: usize },
    #[error("no rolls left this turn")]
    NoRollsLeft,
    #[error("invalid players: {reason}")]
    InvalidPlayers { reason: String },
    #[error("no such player: {player}")]
    UnknownPlayer { player: PlayerId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::InvalidPhase {
            command: "roll",
            phase: Phase::Scoring,
        };
        assert_eq!(err.to_string(), "cannot roll during the scoring phase");

        let err = GameError::InvalidCategory {
            category: "Chance".to_string(),
        };
        assert_eq!(err.to_string(), "category \"Chance\" is not available");

        let err = GameError::UnknownPlayer {
            player: PlayerId::new(3),
        };
        assert_eq!(err.to_string(), "no such player: P3");
    }
}
