//! A roll of five dice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use thiserror::Error;

/// Number of dice in a roll.
pub const DICE_COUNT: usize = 5;

/// Lowest and highest face.
pub const MIN_FACE: u8 = 1;
pub const MAX_FACE: u8 = 6;

/// Raised when building [`Dice`] from raw values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("die {position} has value {value}, expected 1..=6")]
    OutOfRange { position: usize, value: u8 },
}

/// Exactly five die values, each in `1..=6`.
///
/// Positions matter only for holds; scoring looks at the multiset of values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 5]", into = "[u8; 5]")]
pub struct Dice([u8; DICE_COUNT]);

impl Dice {
    /// Validate and wrap five raw values.
    pub fn new(values: [u8; DICE_COUNT]) -> Result<Self, DiceError> {
        for (position, &value) in values.iter().enumerate() {
            if !(MIN_FACE..=MAX_FACE).contains(&value) {
                return Err(DiceError::OutOfRange { position, value });
            }
        }
        Ok(Self(values))
    }

    #[must_use]
    pub const fn values(&self) -> [u8; DICE_COUNT] {
        self.0
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&v| u32::from(v)).sum()
    }

    /// Occurrences of each face, indexed by face (index 0 is unused).
    #[must_use]
    pub fn counts(&self) -> [u8; 7] {
        let mut counts = [0u8; 7];
        for &v in &self.0 {
            counts[v as usize] += 1;
        }
        counts
    }

    /// Highest number of dice sharing one value.
    #[must_use]
    pub fn max_count(&self) -> u8 {
        self.counts().into_iter().max().unwrap_or(0)
    }

    /// Bitmask of distinct faces present: bit `f` is set if face `f` shows.
    #[must_use]
    pub fn face_mask(&self) -> u8 {
        self.0.iter().fold(0u8, |mask, &v| mask | (1 << v))
    }

    /// Iterate over die values in position order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<[u8; DICE_COUNT]> for Dice {
    type Error = DiceError;

    fn try_from(values: [u8; DICE_COUNT]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<Dice> for [u8; DICE_COUNT] {
    fn from(dice: Dice) -> Self {
        dice.0
    }
}

impl Index<usize> for Dice {
    type Output = u8;

    fn index(&self, position: usize) -> &Self::Output {
        &self.0[position]
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "[{a} {b} {c} {d} {e}]")
    }
}
