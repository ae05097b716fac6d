//! Yahtzee turn rules.
//!
//! Phase machine per turn:
//!
//! ```text
//! rolling --(last roll | stop rolling)--> scoring --(commit)--> rolling (next player)
//!                                                  \-(commit, all turns used)--> done
//! ```
//!
//! Every command is checked completely before the first mutation, so a
//! rejected command leaves the state (die source and history included)
//! untouched.

use std::cmp::Reverse;

use tracing::{debug, info};

use crate::core::{
    reroll_dice, Command, CommandRecord, CommitOutcome, DieSource, GameError, GameState, Outcome,
    Phase, RollOutcome, TurnState,
};
use crate::rules::{GameResult, RulesEngine};
use crate::scoring::{
    compute_totals_with, score_category_with, Category, ScoreTable, Totals, DICE_COUNT,
};

/// The rules of the game, parameterized by the score table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YahtzeeRules {
    table: ScoreTable,
}

impl YahtzeeRules {
    #[must_use]
    pub fn new(table: ScoreTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn score_table(&self) -> &ScoreTable {
        &self.table
    }

    /// Flip the hold on `position`. Returns whether the die is now held.
    pub fn toggle_hold<R: DieSource>(
        &self,
        state: &mut GameState<R>,
        position: usize,
    ) -> Result<bool, GameError> {
        self.execute(state, Command::ToggleHold(position), |_, state| {
            require_phase(state, Phase::Rolling, "toggle a hold")?;
            state
                .turn
                .holds
                .toggle(position)
                .ok_or(GameError::InvalidDiePosition { position })
        })
    }

    /// Re-roll every unheld die.
    pub fn roll<R: DieSource>(&self, state: &mut GameState<R>) -> Result<RollOutcome, GameError> {
        self.execute(state, Command::Roll, |_, state| {
            let turn = &state.turn;
            if turn.phase == Phase::Done {
                return Err(GameError::InvalidPhase {
                    command: "roll",
                    phase: turn.phase,
                });
            }
            if turn.rolls_left == 0 {
                return Err(GameError::NoRollsLeft);
            }
            require_phase(state, Phase::Rolling, "roll")?;

            let holds = state.turn.holds;
            let dice = reroll_dice(&state.turn.dice, |p| holds.contains(p), &mut state.rng);

            let turn = &mut state.turn;
            turn.dice = dice;
            turn.rolls_left -= 1;
            if turn.rolls_left == 0 {
                turn.phase = Phase::Scoring;
            }

            debug!(player = %state.current, %dice, rolls_left = turn.rolls_left, "rolled");
            Ok(RollOutcome {
                dice,
                rolls_left: turn.rolls_left,
                phase: turn.phase,
            })
        })
    }

    /// Move from rolling to scoring. Already scoring is a no-op.
    pub fn stop_rolling<R: DieSource>(&self, state: &mut GameState<R>) -> Result<(), GameError> {
        self.execute(state, Command::StopRolling, |_, state| match state.turn.phase {
            Phase::Rolling | Phase::Scoring => {
                state.turn.phase = Phase::Scoring;
                Ok(())
            }
            phase => Err(GameError::InvalidPhase {
                command: "stop rolling",
                phase,
            }),
        })
    }

    /// Score the current dice in `category` for the current player, then
    /// pass the turn or end the game.
    pub fn commit_score<R: DieSource>(
        &self,
        state: &mut GameState<R>,
        category: Category,
    ) -> Result<CommitOutcome, GameError> {
        self.execute(state, Command::CommitScore(category), |rules, state| {
            require_phase(state, Phase::Scoring, "commit a score")?;

            let scorer = state.current;
            let player = &mut state.players[scorer];
            if !player.available.contains(&category) {
                return Err(unavailable(category));
            }

            let score = score_category_with(&state.turn.dice, category, &rules.table);
            player
                .scorecard
                .record(category, score)
                .map_err(|_| unavailable(category))?;
            player.available.remove(&category);
            player.turns_used += 1;

            let scorecard = player.scorecard.clone();
            let totals = compute_totals_with(&scorecard, &rules.table);
            debug!(player = %scorer, %category, score, grand = totals.grand, "score committed");

            let game_over = state.all_turns_used();
            if game_over {
                state.turn.phase = Phase::Done;
                info!(result = ?rules.is_terminal(state), "game over");
            } else {
                advance_player(state);
            }

            Ok(CommitOutcome {
                player: scorer,
                category,
                score,
                scorecard,
                totals,
                game_over,
            })
        })
    }

    /// Score each of the current player's available categories would yield
    /// with the dice on the table, sorted by category name. Empty once the
    /// game is over.
    #[must_use]
    pub fn previews<R>(&self, state: &GameState<R>) -> Vec<(Category, u32)> {
        if state.turn.phase == Phase::Done {
            return Vec::new();
        }
        let available = &state.players[state.current].available;
        Category::alphabetical()
            .into_iter()
            .filter(|c| available.contains(c))
            .map(|c| (c, score_category_with(&state.turn.dice, c, &self.table)))
            .collect()
    }

    /// Available category with the highest preview; ties go to the earliest
    /// category on the scorecard.
    #[must_use]
    pub fn best_category<R>(&self, state: &GameState<R>) -> Option<(Category, u32)> {
        self.previews(state)
            .into_iter()
            .min_by_key(|&(c, score)| (Reverse(score), c.index()))
    }

    #[must_use]
    pub fn totals<R>(&self, state: &GameState<R>) -> Vec<Totals> {
        state
            .players
            .values()
            .map(|p| compute_totals_with(&p.scorecard, &self.table))
            .collect()
    }

    /// Run `op` and record it in history if it succeeds.
    fn execute<R, T>(
        &self,
        state: &mut GameState<R>,
        command: Command,
        op: impl FnOnce(&Self, &mut GameState<R>) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let actor = state.current;
        let turn = state.players[actor].turn_number();
        let dice_before = state.turn.dice;

        match op(self, state) {
            Ok(value) => {
                let dice = if command == Command::Roll { state.turn.dice } else { dice_before };
                let sequence = state.history.len() as u32;
                state.history.push_back(CommandRecord {
                    player: actor,
                    command,
                    dice,
                    turn,
                    sequence,
                });
                Ok(value)
            }
            Err(err) => {
                debug!(player = %actor, command = command.verb(), %err, "command rejected");
                Err(err)
            }
        }
    }
}

fn unavailable(category: Category) -> GameError {
    GameError::InvalidCategory {
        category: category.name().to_string(),
    }
}

fn require_phase<R>(
    state: &GameState<R>,
    wanted: Phase,
    command: &'static str,
) -> Result<(), GameError> {
    let phase = state.turn.phase;
    if phase == wanted {
        Ok(())
    } else {
        Err(GameError::InvalidPhase { command, phase })
    }
}

/// Hand the table to the next seat with turns left and start its turn.
///
/// Only called when at least one player has turns left.
fn advance_player<R: DieSource>(state: &mut GameState<R>) {
    let count = state.player_count();
    let mut next = state.current.next(count);
    for _ in 0..count {
        if state.players[next].has_turns_left() {
            state.current = next;
            break;
        }
        next = next.next(count);
    }

    state.turn = TurnState::fresh(&mut state.rng);
    debug!(player = %state.current, dice = %state.turn.dice, "turn started");
}

impl<R: DieSource> RulesEngine<GameState<R>> for YahtzeeRules {
    type Action = Command;
    type Outcome = Outcome;

    fn legal_actions(&self, state: &GameState<R>) -> Vec<Command> {
        let turn = &state.turn;
        match turn.phase {
            Phase::Rolling => {
                let mut commands: Vec<Command> = (0..DICE_COUNT).map(Command::ToggleHold).collect();
                if turn.rolls_left > 0 {
                    commands.push(Command::Roll);
                }
                commands.push(Command::StopRolling);
                commands
            }
            Phase::Scoring => std::iter::once(Command::StopRolling)
                .chain(
                    state.players[state.current]
                        .available
                        .iter()
                        .map(|&c| Command::CommitScore(c)),
                )
                .collect(),
            Phase::Done => Vec::new(),
        }
    }

    fn apply_action(
        &self,
        state: &mut GameState<R>,
        action: &Command,
    ) -> Result<Outcome, GameError> {
        match *action {
            Command::ToggleHold(position) => self
                .toggle_hold(state, position)
                .map(|held| Outcome::HoldToggled { position, held }),
            Command::Roll => self.roll(state).map(Outcome::Rolled),
            Command::StopRolling => self.stop_rolling(state).map(|()| Outcome::StoppedRolling),
            Command::CommitScore(category) => {
                self.commit_score(state, category).map(Outcome::Committed)
            }
        }
    }

    fn is_terminal(&self, state: &GameState<R>) -> Option<GameResult> {
        if state.turn.phase != Phase::Done {
            return None;
        }
        let grands: Vec<u32> = self.totals(state).iter().map(|t| t.grand).collect();
        GameResult::from_scores(&grands)
    }
}
