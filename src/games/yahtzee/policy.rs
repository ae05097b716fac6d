//! Greedy automatic player.
//!
//! Not a strong player. It exists to drive whole games headlessly: the
//! simulator, benchmarks and integration tests all lean on it.

use tracing::trace;

use super::game::Game;
use crate::core::{Command, CommitOutcome, DieSource, GameError, Outcome, Phase};
use crate::rules::GameResult;
use crate::scoring::{DICE_COUNT, MAX_FACE};

/// Picks the command that looks best right now, one command at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GreedyPolicy {
    /// Stop rolling once some open category would score at least this much.
    pub stop_at: u32,
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self { stop_at: 25 }
    }
}

impl GreedyPolicy {
    #[must_use]
    pub fn new(stop_at: u32) -> Self {
        Self { stop_at }
    }

    /// Next command for the current player, or `None` once the game is over.
    ///
    /// The returned command is always legal.
    #[must_use]
    pub fn choose<R: DieSource>(&self, game: &Game<R>) -> Option<Command> {
        let best = game.rules().best_category(game.state());
        match game.current_phase() {
            Phase::Done => None,
            Phase::Scoring => best.map(|(category, _)| Command::CommitScore(category)),
            Phase::Rolling => {
                let dice = game.dice_state();
                let good_enough = best.is_some_and(|(_, score)| score >= self.stop_at);
                if dice.rolls_left == 0 || good_enough {
                    return Some(Command::StopRolling);
                }

                let target = target_face(&dice.dice.counts());
                let mismatch = (0..DICE_COUNT)
                    .find(|&p| dice.holds.contains(p) != (dice.dice[p] == target));
                Some(match mismatch {
                    Some(position) => Command::ToggleHold(position),
                    None => Command::Roll,
                })
            }
        }
    }

    /// Play the current player's turn through to the commit.
    pub fn play_turn<R: DieSource>(&self, game: &mut Game<R>) -> Result<CommitOutcome, GameError> {
        loop {
            let Some(command) = self.choose(game) else {
                return Err(GameError::InvalidPhase {
                    command: "commit a score",
                    phase: Phase::Done,
                });
            };
            trace!(player = %game.current_player(), ?command, "policy chose");
            if let Outcome::Committed(outcome) = game.apply(command)? {
                return Ok(outcome);
            }
        }
    }

    /// Play every remaining turn for every player and return the result.
    pub fn play_game<R: DieSource>(&self, game: &mut Game<R>) -> Result<GameResult, GameError> {
        loop {
            if let Some(result) = game.winner() {
                return Ok(result);
            }
            self.play_turn(game)?;
        }
    }
}

/// Most frequent face; ties go to the higher face.
fn target_face(counts: &[u8; 7]) -> u8 {
    (1..=MAX_FACE)
        .max_by_key(|&face| (counts[face as usize], face))
        .unwrap_or(MAX_FACE)
}
