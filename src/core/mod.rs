//! Core engine types: players, dice sources, configuration, commands, state.
//!
//! Everything here is game-state plumbing. Scoring rules live in
//! [`crate::scoring`]; the transitions live in [`crate::games::yahtzee`].

pub mod command;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use command::{Command, CommandRecord, CommitOutcome, Outcome, RollOutcome};
pub use config::{default_player_names, ConfigError, GameConfig, MAX_AWARD, MAX_PLAYERS};
pub use error::GameError;
pub use player::{PlayerId, PlayerMap};
pub use rng::{roll_dice, reroll_dice, DieSource, GameRng, GameRngState, ScriptedDice};
pub use state::{
    GameSnapshot, GameState, HoldSet, Phase, PlayerSnapshot, PlayerState, TurnState,
    ROLLS_PER_TURN, TURNS_PER_PLAYER,
};
