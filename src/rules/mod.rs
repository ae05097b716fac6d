//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for each game state
//! - How actions modify state
//! - End-of-game resolution
//!
//! Drivers and policies talk to the trait, not to a particular game.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
