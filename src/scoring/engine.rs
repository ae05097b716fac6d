//! Pure scoring functions.
//!
//! Nothing here holds state: every function maps dice (or a scorecard) and a
//! [`ScoreTable`] to a number. The functions without a table argument use
//! [`ScoreTable::STANDARD`].

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::dice::Dice;
use super::scorecard::{Scorecard, Totals};

/// Fixed awards used by the scoring rules.
///
/// The upper-section categories, the kinds and Chance are sums of dice and
/// have no constant of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub full_house: u32,
    pub small_straight: u32,
    pub large_straight: u32,
    /// Award for five of a kind scored as Yahtzee.
    pub yahtzee: u32,
    /// Bonus added once the upper subtotal reaches `upper_bonus_threshold`.
    pub upper_bonus: u32,
    pub upper_bonus_threshold: u32,
}

impl ScoreTable {
    /// Standard awards: 25 / 30 / 40 / 50, and 35 for an upper subtotal of 63.
    pub const STANDARD: ScoreTable = ScoreTable {
        full_house: 25,
        small_straight: 30,
        large_straight: 40,
        yahtzee: 50,
        upper_bonus: 35,
        upper_bonus_threshold: 63,
    };

    /// Override the Yahtzee award.
    #[must_use]
    pub fn with_yahtzee(mut self, award: u32) -> Self {
        self.yahtzee = award;
        self
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

const SMALL_STRAIGHTS: [u8; 3] = [0b0001_1110, 0b0011_1100, 0b0111_1000];
const LARGE_STRAIGHTS: [u8; 2] = [0b0011_1110, 0b0111_1100];

/// True if the distinct faces contain 1-2-3-4, 2-3-4-5 or 3-4-5-6.
#[must_use]
pub fn is_small_straight(dice: &Dice) -> bool {
    let faces = dice.face_mask();
    SMALL_STRAIGHTS.iter().any(|&run| faces & run == run)
}

/// True iff the distinct faces are exactly 1-2-3-4-5 or 2-3-4-5-6.
#[must_use]
pub fn is_large_straight(dice: &Dice) -> bool {
    LARGE_STRAIGHTS.contains(&dice.face_mask())
}

/// Exactly one pair and one triple of distinct values.
fn is_full_house(dice: &Dice) -> bool {
    let mut counts: Vec<u8> = dice.counts().into_iter().filter(|&c| c > 0).collect();
    counts.sort_unstable();
    counts == [2, 3]
}

/// Score `category` for `dice` under the standard table.
#[must_use]
pub fn score_category(dice: &Dice, category: Category) -> u32 {
    score_category_with(dice, category, &ScoreTable::STANDARD)
}

/// Score `category` for `dice` under `table`.
#[must_use]
pub fn score_category_with(dice: &Dice, category: Category, table: &ScoreTable) -> u32 {
    let award_if = |hit: bool, award: u32| if hit { award } else { 0 };

    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.face().unwrap_or_default();
            dice.iter().filter(|&v| v == face).map(u32::from).sum()
        }
        Category::ThreeOfAKind => award_if(dice.max_count() >= 3, dice.sum()),
        Category::FourOfAKind => award_if(dice.max_count() >= 4, dice.sum()),
        Category::FullHouse => award_if(is_full_house(dice), table.full_house),
        Category::SmallStraight => award_if(is_small_straight(dice), table.small_straight),
        Category::LargeStraight => award_if(is_large_straight(dice), table.large_straight),
        Category::Yahtzee => award_if(dice.max_count() == 5, table.yahtzee),
        Category::Chance => dice.sum(),
    }
}

/// Every category's score for `dice`, indexed by [`Category::index`].
#[must_use]
pub fn score_all(dice: &Dice, table: &ScoreTable) -> [u32; Category::COUNT] {
    Category::ALL.map(|c| score_category_with(dice, c, table))
}

/// Totals for `card` under the standard table.
#[must_use]
pub fn compute_totals(card: &Scorecard) -> Totals {
    compute_totals_with(card, &ScoreTable::STANDARD)
}

/// Totals for `card` under `table`. Unscored categories count as zero.
///
/// Sums saturate at `u32::MAX` rather than overflow.
#[must_use]
pub fn compute_totals_with(card: &Scorecard, table: &ScoreTable) -> Totals {
    let section_sum = |cats: &[Category]| -> u32 {
        cats.iter()
            .filter_map(|&c| card.get(c))
            .fold(0, u32::saturating_add)
    };

    let upper = section_sum(&Category::UPPER);
    let lower = section_sum(&Category::LOWER);
    let bonus = if upper >= table.upper_bonus_threshold {
        table.upper_bonus
    } else {
        0
    };

    Totals {
        upper,
        bonus,
        lower,
        grand: upper.saturating_add(bonus).saturating_add(lower),
    }
}
