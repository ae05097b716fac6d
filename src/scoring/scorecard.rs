//! Per-player scorecard and its derived totals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::Category;

/// Raised when writing to a category that already holds a score.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{category} is already scored ({existing})")]
pub struct AlreadyScored {
    pub category: Category,
    pub existing: u32,
}

/// Mapping from category to an optional score.
///
/// Every entry starts unscored and can be filled exactly once. A recorded
/// zero is a score, not an empty slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scorecard {
    entries: [Option<u32>; Category::COUNT],
}

impl Scorecard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score recorded for `category`, if any.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<u32> {
        self.entries[category.index()]
    }

    #[must_use]
    pub fn is_scored(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// Fill an unscored category.
    pub fn record(&mut self, category: Category, score: u32) -> Result<(), AlreadyScored> {
        let slot = &mut self.entries[category.index()];
        match *slot {
            Some(existing) => Err(AlreadyScored { category, existing }),
            None => {
                *slot = Some(score);
                Ok(())
            }
        }
    }

    /// Iterate over `(category, entry)` in scorecard order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Option<u32>)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Categories still unscored, in scorecard order.
    pub fn unscored(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|&c| !self.is_scored(c))
    }

    #[must_use]
    pub fn scored_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scored_count() == Category::COUNT
    }
}

/// Aggregate totals for a scorecard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of scored upper categories.
    pub upper: u32,
    /// Upper-section bonus (0 or the configured amount).
    pub bonus: u32,
    /// Sum of scored lower categories.
    pub lower: u32,
    /// `upper + bonus + lower`.
    pub grand: u32,
}
