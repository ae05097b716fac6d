//! Scoring engine: categories, dice, scorecards and the pure scoring rules.
//!
//! This module has no dependency on game state. The turn state machine calls
//! into it for previews and committed scores.

pub mod category;
pub mod dice;
pub mod engine;
pub mod scorecard;

pub use category::{Category, ParseCategoryError};
pub use dice::{Dice, DiceError, DICE_COUNT, MAX_FACE, MIN_FACE};
pub use engine::{
    compute_totals, compute_totals_with, is_large_straight, is_small_straight, score_all,
    score_category, score_category_with, ScoreTable,
};
pub use scorecard::{AlreadyScored, Scorecard, Totals};
