//! The `Game` facade: one owned game with the full command and query surface.

use im::Vector;
use tracing::info;

use super::rules::YahtzeeRules;
use crate::core::{
    Command, CommandRecord, CommitOutcome, DieSource, GameConfig, GameError, GameRng,
    GameSnapshot, GameState, HoldSet, Outcome, Phase, PlayerId, PlayerState, RollOutcome,
};
use crate::rules::{GameResult, RulesEngine};
use crate::scoring::{compute_totals_with, Category, Dice, ScoreTable, Scorecard, Totals};

/// Dice on the table and what the current player may still do with them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceState {
    pub dice: Dice,
    pub holds: HoldSet,
    pub rolls_left: u8,
}

/// A game of Yahtzee.
///
/// Owns the rules, the state and the die source. Every command either
/// applies completely or returns an error and changes nothing.
pub struct Game<R = GameRng> {
    rules: YahtzeeRules,
    state: GameState<R>,
}

/// Builder for creating a `Game`.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn players<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.config = self.config.with_players(names);
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    #[must_use]
    pub fn scoring(mut self, table: ScoreTable) -> Self {
        self.config.scoring = table;
        self
    }

    /// Override only the Yahtzee award.
    #[must_use]
    pub fn yahtzee_score(mut self, award: u32) -> Self {
        self.config.scoring = self.config.scoring.with_yahtzee(award);
        self
    }

    /// Build a game rolling seeded ChaCha8 dice.
    pub fn build(self) -> Result<Game<GameRng>, GameError> {
        let rng = GameRng::new(self.config.seed);
        self.build_with_source(rng)
    }

    /// Build a game rolling dice from `source`. The configured seed is unused.
    pub fn build_with_source<R: DieSource>(self, source: R) -> Result<Game<R>, GameError> {
        let rules = YahtzeeRules::new(self.config.scoring);
        Game::with_source(self.config.players, rules, source)
    }
}

impl Game<GameRng> {
    /// Two-player game with default names and table.
    pub fn new(seed: u64) -> Result<Self, GameError> {
        GameBuilder::new().seed(seed).build()
    }
}

impl<R: DieSource> Game<R> {
    fn with_source(names: Vec<String>, rules: YahtzeeRules, source: R) -> Result<Self, GameError> {
        let state = GameState::new(names, source)?;
        info!(players = state.player_count(), "new game");
        Ok(Self { rules, state })
    }

    // ---- commands ----

    /// Replace the whole game with a fresh one for `names`.
    pub fn new_game<S: Into<String>>(
        &mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<(), GameError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.state.reset(names)?;
        info!(players = self.state.player_count(), "new game");
        Ok(())
    }

    /// Start over with the same players.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let names = self.player_names();
        self.new_game(names)
    }

    pub fn toggle_hold(&mut self, position: usize) -> Result<bool, GameError> {
        self.rules.toggle_hold(&mut self.state, position)
    }

    pub fn roll(&mut self) -> Result<RollOutcome, GameError> {
        self.rules.roll(&mut self.state)
    }

    pub fn stop_rolling(&mut self) -> Result<(), GameError> {
        self.rules.stop_rolling(&mut self.state)
    }

    pub fn commit_score(&mut self, category: Category) -> Result<CommitOutcome, GameError> {
        self.rules.commit_score(&mut self.state, category)
    }

    /// Commit by category name, as typed by a user.
    ///
    /// An unrecognized name is `InvalidCategory`, the same as an
    /// unavailable one.
    pub fn commit_score_named(&mut self, name: &str) -> Result<CommitOutcome, GameError> {
        let category: Category = name.parse().map_err(|_| GameError::InvalidCategory {
            category: name.to_string(),
        })?;
        self.commit_score(category)
    }

    /// Apply any command.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, GameError> {
        self.rules.apply_action(&mut self.state, &command)
    }

    /// Every command `apply` would accept right now.
    #[must_use]
    pub fn legal_commands(&self) -> Vec<Command> {
        self.rules.legal_actions(&self.state)
    }

    /// `None` while the game runs, then the winner or a draw.
    #[must_use]
    pub fn winner(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state)
    }
}

impl<R> Game<R> {
    // ---- queries ----

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    #[must_use]
    pub fn current_player_name(&self) -> &str {
        self.state.players()[self.state.current_player()].name()
    }

    #[must_use]
    pub fn current_phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn dice_state(&self) -> DiceState {
        let turn = self.state.turn();
        DiceState {
            dice: turn.dice,
            holds: turn.holds,
            rolls_left: turn.rolls_left,
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.phase() == Phase::Done
    }

    /// Unscored categories in scorecard order.
    pub fn available_categories(&self, player: PlayerId) -> Result<Vec<Category>, GameError> {
        Ok(self.player(player)?.available().iter().copied().collect())
    }

    /// Unscored categories sorted by name.
    pub fn available_categories_alphabetical(
        &self,
        player: PlayerId,
    ) -> Result<Vec<Category>, GameError> {
        let available = self.player(player)?.available();
        Ok(Category::alphabetical()
            .into_iter()
            .filter(|c| available.contains(c))
            .collect())
    }

    pub fn scorecard(&self, player: PlayerId) -> Result<&Scorecard, GameError> {
        Ok(self.player(player)?.scorecard())
    }

    pub fn totals(&self, player: PlayerId) -> Result<Totals, GameError> {
        let card = self.player(player)?.scorecard();
        Ok(compute_totals_with(card, self.rules.score_table()))
    }

    pub fn turns_used(&self, player: PlayerId) -> Result<u8, GameError> {
        Ok(self.player(player)?.turns_used())
    }

    /// 1-based turn in progress, capped at 13.
    pub fn turn_number(&self, player: PlayerId) -> Result<u8, GameError> {
        Ok(self.player(player)?.turn_number())
    }

    /// What each of the current player's open categories would score with
    /// the dice on the table, sorted by category name.
    #[must_use]
    pub fn category_previews(&self) -> Vec<(Category, u32)> {
        self.rules.previews(&self.state)
    }

    #[must_use]
    pub fn player_by_name(&self, name: &str) -> Option<PlayerId> {
        self.state.player_by_name(name)
    }

    #[must_use]
    pub fn player_names(&self) -> Vec<String> {
        self.state.players().values().map(|p| p.name().to_string()).collect()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.state.player_count()
    }

    /// Accepted commands, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<CommandRecord> {
        self.state.history()
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot(self.rules.score_table())
    }

    #[must_use]
    pub fn score_table(&self) -> &ScoreTable {
        self.rules.score_table()
    }

    #[must_use]
    pub fn rules(&self) -> &YahtzeeRules {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    fn player(&self, player: PlayerId) -> Result<&PlayerState, GameError> {
        self.state.player(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ScriptedDice, ROLLS_PER_TURN};

    fn scripted(faces: &[u8]) -> Game<ScriptedDice> {
        GameBuilder::new()
            .players(["Ada", "Grace"])
            .build_with_source(ScriptedDice::new(faces.to_vec()))
            .unwrap()
    }

    #[test]
    fn test_default_game() {
        let game = Game::new(42).unwrap();

        assert_eq!(game.player_names(), vec!["Player 1", "Player 2"]);
        assert_eq!(game.current_player(), PlayerId::new(0));
        assert_eq!(game.current_player_name(), "Player 1");
        assert_eq!(game.current_phase(), Phase::Rolling);
        assert_eq!(game.dice_state().rolls_left, ROLLS_PER_TURN);
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_builder_rejects_bad_players() {
        let result = GameBuilder::new().players(Vec::<String>::new()).build();
        assert!(matches!(result, Err(GameError::InvalidPlayers { .. })));

        let result = GameBuilder::new().players(["Ada", " "]).build();
        assert!(matches!(result, Err(GameError::InvalidPlayers { .. })));
    }

    #[test]
    fn test_commit_score_named() {
        let mut game = scripted(&[5]);
        game.stop_rolling().unwrap();

        let err = game.commit_score_named("Bogus").unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidCategory {
                category: "Bogus".to_string(),
            }
        );

        let outcome = game.commit_score_named("fives").unwrap();
        assert_eq!(outcome.category, Category::Fives);
        assert_eq!(outcome.score, 25);
    }

    #[test]
    fn test_recommit_is_invalid_category() {
        let mut game = scripted(&[5]);

        game.stop_rolling().unwrap();
        game.commit_score(Category::Chance).unwrap();
        game.stop_rolling().unwrap();
        game.commit_score(Category::Chance).unwrap();

        game.stop_rolling().unwrap();
        let before = game.snapshot();
        let err = game.commit_score(Category::Chance).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidCategory {
                category: "Chance".to_string(),
            }
        );
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_player_queries() {
        let mut game = scripted(&[3, 3, 3, 2, 2]);
        game.stop_rolling().unwrap();
        game.commit_score(Category::FullHouse).unwrap();

        let ada = game.player_by_name("Ada").unwrap();
        assert_eq!(game.turns_used(ada).unwrap(), 1);
        assert_eq!(game.turn_number(ada).unwrap(), 2);
        assert_eq!(game.scorecard(ada).unwrap().get(Category::FullHouse), Some(25));
        assert_eq!(game.totals(ada).unwrap().grand, 25);
        assert_eq!(game.available_categories(ada).unwrap().len(), 12);
        assert!(!game
            .available_categories_alphabetical(ada)
            .unwrap()
            .contains(&Category::FullHouse));

        let nobody = PlayerId::new(2);
        assert_eq!(
            game.totals(nobody).unwrap_err(),
            GameError::UnknownPlayer { player: nobody }
        );
    }

    #[test]
    fn test_alphabetical_categories() {
        let game = scripted(&[1]);
        let alpha = game.available_categories_alphabetical(PlayerId::new(0)).unwrap();

        assert_eq!(alpha.first(), Some(&Category::Chance));
        assert_eq!(alpha.last(), Some(&Category::Yahtzee));
        assert_eq!(
            game.available_categories(PlayerId::new(0)).unwrap(),
            Category::ALL.to_vec()
        );
    }

    #[test]
    fn test_new_game_resets_everything() {
        let mut game = scripted(&[6]);
        game.stop_rolling().unwrap();
        game.commit_score(Category::Yahtzee).unwrap();

        game.new_game(["North", "South", "East"]).unwrap();

        assert_eq!(game.player_count(), 3);
        assert_eq!(game.current_player_name(), "North");
        assert!(game.history().is_empty());
        assert_eq!(game.turns_used(PlayerId::new(0)).unwrap(), 0);
        assert_eq!(game.current_phase(), Phase::Rolling);
    }

    #[test]
    fn test_failed_new_game_keeps_old_game() {
        let mut game = scripted(&[6]);
        game.stop_rolling().unwrap();

        assert!(game.new_game(["Solo", "Solo"]).is_err());
        assert_eq!(game.current_phase(), Phase::Scoring);
        assert_eq!(game.player_names(), vec!["Ada", "Grace"]);
    }

    #[test]
    fn test_restart_keeps_names() {
        let mut game = scripted(&[2]);
        game.stop_rolling().unwrap();
        game.commit_score(Category::Twos).unwrap();

        game.restart().unwrap();

        assert_eq!(game.player_names(), vec!["Ada", "Grace"]);
        assert_eq!(game.current_player(), PlayerId::new(0));
        assert!(game.scorecard(PlayerId::new(0)).unwrap().get(Category::Twos).is_none());
    }

    #[test]
    fn test_apply_matches_named_commands() {
        let mut game = scripted(&[4]);

        let outcome = game.apply(Command::ToggleHold(2)).unwrap();
        assert_eq!(
            outcome,
            Outcome::HoldToggled {
                position: 2,
                held: true,
            }
        );
        assert!(game.dice_state().holds.contains(2));

        assert!(game.legal_commands().contains(&Command::Roll));
        assert_eq!(game.apply(Command::StopRolling).unwrap(), Outcome::StoppedRolling);
        assert!(!game.legal_commands().contains(&Command::Roll));
    }

    #[test]
    fn test_yahtzee_score_override() {
        let mut game = GameBuilder::new()
            .yahtzee_score(75)
            .build_with_source(ScriptedDice::new([1]))
            .unwrap();

        game.stop_rolling().unwrap();
        assert_eq!(game.commit_score(Category::Yahtzee).unwrap().score, 75);
        assert_eq!(game.score_table().yahtzee, 75);
    }
}
