//! Commands a driver can issue, their outcomes, and the history record.
//!
//! A command is the unit of state change: the rules engine either applies it
//! completely and returns an [`Outcome`], or rejects it and changes nothing.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::Phase;
use crate::scoring::{Category, Dice, Scorecard, Totals};

/// A state-changing request against the current turn.
///
/// Starting a new game is not a command: it replaces the state wholesale
/// instead of transitioning it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Flip whether the die at this position is kept on the next roll.
    ToggleHold(usize),
    /// Re-roll every die that is not held.
    Roll,
    /// End rolling and move to scoring.
    StopRolling,
    /// Score the current dice in a category and pass the turn.
    CommitScore(Category),
}

impl Command {
    /// Short verb used in logs and error messages.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Command::ToggleHold(_) => "toggle a hold",
            Command::Roll => "roll",
            Command::StopRolling => "stop rolling",
            Command::CommitScore(_) => "commit a score",
        }
    }
}

/// Result of an accepted roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub dice: Dice,
    pub rolls_left: u8,
    /// `Scoring` once the last roll is used, otherwise `Rolling`.
    pub phase: Phase,
}

/// Result of a committed score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOutcome {
    /// Who scored.
    pub player: PlayerId,
    pub category: Category,
    pub score: u32,
    /// The scorer's card after the commit.
    pub scorecard: Scorecard,
    pub totals: Totals,
    /// True when this commit ended the game.
    pub game_over: bool,
}

/// What an accepted command did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    HoldToggled { position: usize, held: bool },
    Rolled(RollOutcome),
    StoppedRolling,
    Committed(CommitOutcome),
}

/// An accepted command, for history and replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The player who issued the command.
    pub player: PlayerId,
    pub command: Command,
    /// Dice after a roll; for any other command, the dice on the table
    /// when it was issued.
    pub dice: Dice,
    /// The issuing player's turn number (1-based).
    pub turn: u8,
    /// Position in the game's history.
    pub sequence: u32,
}
