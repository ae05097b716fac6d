//! Sources of die values.
//!
//! The state machine never calls an ambient RNG. Every die it rolls comes
//! from a [`DieSource`] owned by the game, so tests can fix the outcome of
//! every roll.
//!
//! - [`GameRng`]: seeded ChaCha8 stream. Same seed, same dice.
//! - [`ScriptedDice`]: replays a fixed list of faces, cycling when exhausted.
//!
//! ```
//! use yahtzee_engine::core::{DieSource, GameRng};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! for _ in 0..20 {
//!     assert_eq!(a.next_die(), b.next_die());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::scoring::{Dice, DICE_COUNT, MAX_FACE, MIN_FACE};

/// Supplies die faces.
///
/// Implementations must return a value in `1..=6` from every call. A face
/// outside that range is a bug in the source, not a game error:
/// [`roll_dice`] and [`reroll_dice`] panic on it, and so does every game
/// command that rolls (starting a game, restarting, `roll` and the commit
/// that opens the next turn).
pub trait DieSource {
    fn next_die(&mut self) -> u8;
}

/// Roll all five dice.
///
/// # Panics
/// Panics if `source` returns a face outside `1..=6`.
pub fn roll_dice<R: DieSource + ?Sized>(source: &mut R) -> Dice {
    let values: [u8; DICE_COUNT] = std::array::from_fn(|_| source.next_die());
    Dice::new(values).expect("die source returned a face outside 1..=6")
}

/// Replace every die whose position fails `keep` with a fresh value.
///
/// Kept dice consume nothing from `source`.
///
/// # Panics
/// Panics if `source` returns a face outside `1..=6`.
pub fn reroll_dice<R: DieSource + ?Sized>(
    dice: &Dice,
    keep: impl Fn(usize) -> bool,
    source: &mut R,
) -> Dice {
    let mut values = dice.values();
    for (position, value) in values.iter_mut().enumerate() {
        if !keep(position) {
            *value = source.next_die();
        }
    }
    Dice::new(values).expect("die source returned a face outside 1..=6")
}

/// Deterministic RNG for dice, backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the stream from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DieSource for GameRng {
    fn next_die(&mut self) -> u8 {
        self.inner.gen_range(MIN_FACE..=MAX_FACE)
    }
}

/// Serializable RNG position.
///
/// Uses the ChaCha8 word position, so capture and restore are O(1)
/// regardless of how many dice have been rolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Fixed sequence of faces, replayed in order and cycled when exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// # Panics
    /// Panics if `faces` is empty or holds a value outside `1..=6`.
    #[must_use]
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        let faces = faces.into();
        assert!(!faces.is_empty(), "ScriptedDice needs at least one face");
        assert!(
            faces.iter().all(|f| (MIN_FACE..=MAX_FACE).contains(f)),
            "ScriptedDice faces must be in 1..=6"
        );
        Self { faces, cursor: 0 }
    }

    /// Number of faces handed out so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl DieSource for ScriptedDice {
    fn next_die(&mut self) -> u8 {
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}
