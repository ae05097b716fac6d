//! Yahtzee for 1 to 8 players.
//!
//! - Each player takes 13 turns, one per scorecard category
//! - A turn starts with all five dice rolled and three rolls left
//! - Hold any dice, re-roll the rest, stop whenever
//! - Commit the dice to an unused category and pass the turn
//! - Highest grand total wins once every card is full

mod game;
mod policy;
mod rules;

pub use game::{DiceState, Game, GameBuilder};
pub use policy::GreedyPolicy;
pub use rules::YahtzeeRules;
