//! The 13 scoring categories.
//!
//! Categories are split into the *upper* section (one per face, scored by
//! summing that face) and the *lower* section (combinations).
//!
//! `Category::ALL` is the canonical order: upper section first, then the
//! lower section as printed on a scorecard. Use [`Category::alphabetical`]
//! when listing categories by name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A scoring slot on a scorecard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

impl Category {
    /// Number of categories (and of turns each player gets).
    pub const COUNT: usize = 13;

    /// All categories in scorecard order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// The six upper-section categories.
    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// The seven lower-section categories.
    pub const LOWER: [Category; 7] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    /// Position in [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Face value for upper categories, `None` for the lower section.
    #[must_use]
    pub const fn face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_upper(self) -> bool {
        self.face().is_some()
    }

    /// Display name, e.g. `"Three of a Kind"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Yahtzee => "Yahtzee",
            Category::Chance => "Chance",
        }
    }

    /// All categories sorted by display name.
    ///
    /// ```
    /// use yahtzee_engine::scoring::Category;
    ///
    /// let sorted = Category::alphabetical();
    /// assert_eq!(sorted[0], Category::Chance);
    /// assert_eq!(sorted[12], Category::Yahtzee);
    /// ```
    #[must_use]
    pub fn alphabetical() -> [Category; Category::COUNT] {
        let mut all = Category::ALL;
        all.sort_by_key(|c| c.name());
        all
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown category: {0:?}")]
pub struct ParseCategoryError(pub String);

/// Lowercase and drop spaces, underscores and dashes so that
/// `"Full House"`, `"full_house"` and `"FullHouse"` compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Category::ALL
            .into_iter()
            .find(|c| normalize(c.name()) == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
