//! # yahtzee-engine
//!
//! Rules engine for Yahtzee: a pure scoring engine plus a turn state machine.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: A [`Game`] owns everything, including its die source.
//!    No globals, no ambient RNG.
//!
//! 2. **All-or-Nothing Commands**: Every command returns a `Result`. A
//!    rejected command leaves the game exactly as it was.
//!
//! 3. **Injectable Dice**: Any [`DieSource`] can drive a game. Seeded
//!    [`GameRng`] for play and replay, [`ScriptedDice`] for tests.
//!
//! ## Modules
//!
//! - `scoring`: Categories, dice, scorecards and the pure scoring rules
//! - `core`: Players, dice sources, configuration, commands, state, errors
//! - `rules`: RulesEngine trait and game results
//! - `games`: The Yahtzee turn machine, the `Game` facade and a greedy policy
//!
//! ```
//! use yahtzee_engine::{Category, Game, Phase};
//!
//! let mut game = Game::new(7).unwrap();
//! game.toggle_hold(0).unwrap();
//! game.roll().unwrap();
//! game.stop_rolling().unwrap();
//!
//! let outcome = game.commit_score(Category::Chance).unwrap();
//! assert_eq!(outcome.score, outcome.totals.grand);
//! assert_eq!(game.current_phase(), Phase::Rolling);
//! assert_eq!(game.current_player_name(), "Player 2");
//! ```

pub mod core;
pub mod games;
pub mod rules;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    Command, CommandRecord, CommitOutcome, DieSource, GameConfig, GameError, GameRng,
    GameSnapshot, GameState, Outcome, Phase, PlayerId, PlayerMap, RollOutcome, ScriptedDice,
};

pub use crate::scoring::{
    compute_totals, score_category, Category, Dice, DiceError, ScoreTable, Scorecard, Totals,
};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::games::yahtzee::{DiceState, Game, GameBuilder, GreedyPolicy, YahtzeeRules};
