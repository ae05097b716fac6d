//! Game state: players, the turn in progress, and command history.
//!
//! ## PlayerState
//!
//! Per-player record: name, scorecard, categories still available, turns used.
//!
//! ## TurnState
//!
//! The shared turn context: dice on the table, holds, rolls left, phase.
//!
//! ## GameState
//!
//! Everything above plus the die source and history. Only the rules engine
//! mutates it; drivers read it through accessors or a [`GameSnapshot`].

use im::{OrdSet, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use super::command::CommandRecord;
use super::config::validate_player_names;
use super::error::GameError;
use super::player::{PlayerId, PlayerMap};
use super::rng::{roll_dice, DieSource};
use crate::scoring::{
    compute_totals_with, Category, Dice, ScoreTable, Scorecard, Totals, DICE_COUNT,
};

/// Rolls a player gets at the start of each turn.
pub const ROLLS_PER_TURN: u8 = 3;

/// Turns each player takes, one per category.
pub const TURNS_PER_PLAYER: u8 = Category::COUNT as u8;

/// Which commands the current turn accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Holds may be toggled and dice rolled.
    Rolling,
    /// The current player must commit a category.
    Scoring,
    /// Every player has used all turns.
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Rolling => "rolling",
            Phase::Scoring => "scoring",
            Phase::Done => "done",
        })
    }
}

/// Set of held die positions (0..=4), stored as a bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldSet(u8);

impl HoldSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        position < DICE_COUNT && self.0 & (1 << position) != 0
    }

    /// Flip `position`. Returns whether it is now held, or `None` if the
    /// position is not a die.
    pub fn toggle(&mut self, position: usize) -> Option<bool> {
        if position >= DICE_COUNT {
            return None;
        }
        self.0 ^= 1 << position;
        Some(self.contains(position))
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Held positions in ascending order.
    #[must_use]
    pub fn positions(&self) -> SmallVec<[usize; DICE_COUNT]> {
        (0..DICE_COUNT).filter(|&p| self.contains(p)).collect()
    }
}

impl FromIterator<usize> for HoldSet {
    /// Positions outside 0..=4 are ignored.
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut holds = HoldSet::new();
        for position in iter {
            if !holds.contains(position) {
                holds.toggle(position);
            }
        }
        holds
    }
}

/// Per-player record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub(crate) name: String,
    pub(crate) scorecard: Scorecard,
    pub(crate) available: OrdSet<Category>,
    pub(crate) turns_used: u8,
}

impl PlayerState {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scorecard: Scorecard::new(),
            available: Category::ALL.into_iter().collect(),
            turns_used: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    /// Categories not yet scored, in scorecard order.
    #[must_use]
    pub fn available(&self) -> &OrdSet<Category> {
        &self.available
    }

    #[must_use]
    pub fn turns_used(&self) -> u8 {
        self.turns_used
    }

    #[must_use]
    pub fn has_turns_left(&self) -> bool {
        self.turns_used < TURNS_PER_PLAYER
    }

    /// 1-based number of the turn in progress, capped at the last turn.
    #[must_use]
    pub fn turn_number(&self) -> u8 {
        (self.turns_used + 1).min(TURNS_PER_PLAYER)
    }
}

/// Shared context of the turn in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub dice: Dice,
    pub holds: HoldSet,
    pub rolls_left: u8,
    pub phase: Phase,
}

impl TurnState {
    /// Start a turn: fresh dice, nothing held, all rolls left.
    pub fn fresh<R: DieSource + ?Sized>(source: &mut R) -> Self {
        Self {
            dice: roll_dice(source),
            holds: HoldSet::new(),
            rolls_left: ROLLS_PER_TURN,
            phase: Phase::Rolling,
        }
    }
}

/// Full game state.
pub struct GameState<R> {
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) name_index: FxHashMap<String, PlayerId>,
    pub(crate) current: PlayerId,
    pub(crate) turn: TurnState,
    pub(crate) history: Vector<CommandRecord>,
    pub(crate) rng: R,
}

impl<R: DieSource> GameState<R> {
    /// Seat `names` in order and start the first turn.
    pub fn new(names: Vec<String>, mut rng: R) -> Result<Self, GameError> {
        validate_player_names(&names).map_err(|reason| GameError::InvalidPlayers { reason })?;
        let turn = TurnState::fresh(&mut rng);
        Ok(Self::seated(names, turn, rng))
    }

    /// Replace all game state with a fresh game for `names`, keeping the
    /// die source. On error nothing changes.
    pub fn reset(&mut self, names: Vec<String>) -> Result<(), GameError> {
        validate_player_names(&names).map_err(|reason| GameError::InvalidPlayers { reason })?;

        let name_index = index_names(&names);
        self.players = PlayerMap::from_vec(names.into_iter().map(PlayerState::new).collect());
        self.name_index = name_index;
        self.current = PlayerId::new(0);
        self.turn = TurnState::fresh(&mut self.rng);
        self.history = Vector::new();
        Ok(())
    }

    fn seated(names: Vec<String>, turn: TurnState, rng: R) -> Self {
        Self {
            name_index: index_names(&names),
            players: PlayerMap::from_vec(names.into_iter().map(PlayerState::new).collect()),
            current: PlayerId::new(0),
            turn,
            history: Vector::new(),
            rng,
        }
    }
}

fn index_names(names: &[String]) -> FxHashMap<String, PlayerId> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), PlayerId::new(i as u8)))
        .collect()
}

impl<R> GameState<R> {
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    pub fn player(&self, player: PlayerId) -> Result<&PlayerState, GameError> {
        self.players.get(player).ok_or(GameError::UnknownPlayer { player })
    }

    #[must_use]
    pub fn player_by_name(&self, name: &str) -> Option<PlayerId> {
        self.name_index.get(name).copied()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    #[must_use]
    pub fn history(&self) -> &Vector<CommandRecord> {
        &self.history
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// True once every player has used every turn.
    #[must_use]
    pub fn all_turns_used(&self) -> bool {
        self.players.values().all(|p| !p.has_turns_left())
    }

    /// Serializable view of the whole game.
    #[must_use]
    pub fn snapshot(&self, table: &ScoreTable) -> GameSnapshot {
        GameSnapshot {
            players: self
                .players
                .iter()
                .map(|(id, p)| PlayerSnapshot {
                    id,
                    name: p.name.clone(),
                    scorecard: p.scorecard.clone(),
                    totals: compute_totals_with(&p.scorecard, table),
                    available: p.available.iter().copied().collect(),
                    turns_used: p.turns_used,
                })
                .collect(),
            current_player: self.current,
            turn: self.turn,
        }
    }
}

/// One player's part of a [`GameSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub scorecard: Scorecard,
    pub totals: Totals,
    pub available: Vec<Category>,
    pub turns_used: u8,
}

/// Read-only copy of the game for presentation layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub current_player: PlayerId,
    pub turn: TurnState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedDice;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hold_set_toggle() {
        let mut holds = HoldSet::new();

        assert_eq!(holds.toggle(2), Some(true));
        assert_eq!(holds.toggle(4), Some(true));
        assert!(holds.contains(2));
        assert_eq!(holds.len(), 2);
        assert_eq!(holds.positions().as_slice(), &[2, 4]);

        assert_eq!(holds.toggle(2), Some(false));
        assert!(!holds.contains(2));
        assert_eq!(holds.len(), 1);
    }

    #[test]
    fn test_hold_set_rejects_out_of_range() {
        let mut holds = HoldSet::new();
        assert_eq!(holds.toggle(5), None);
        assert!(holds.is_empty());
        assert!(!holds.contains(7));
    }

    #[test]
    fn test_hold_set_from_iter() {
        let holds: HoldSet = [0, 3, 3, 9].into_iter().collect();
        assert_eq!(holds.positions().as_slice(), &[0, 3]);

        let mut cleared = holds;
        cleared.clear();
        assert!(cleared.is_empty());
        assert_eq!(holds.len(), 2);
    }

    #[test]
    fn test_player_state_new() {
        let player = PlayerState::new("Ada");

        assert_eq!(player.name(), "Ada");
        assert_eq!(player.available().len(), 13);
        assert_eq!(player.turns_used(), 0);
        assert_eq!(player.turn_number(), 1);
        assert!(player.has_turns_left());
    }

    #[test]
    fn test_turn_number_caps() {
        let mut player = PlayerState::new("Ada");
        player.turns_used = TURNS_PER_PLAYER;

        assert_eq!(player.turn_number(), 13);
        assert!(!player.has_turns_left());
    }

    #[test]
    fn test_game_state_new() {
        let state = GameState::new(names(&["Ada", "Grace"]), ScriptedDice::new([4])).unwrap();

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.current_player(), PlayerId::new(0));
        assert_eq!(state.phase(), Phase::Rolling);
        assert_eq!(state.turn().rolls_left, ROLLS_PER_TURN);
        assert_eq!(state.turn().dice.values(), [4, 4, 4, 4, 4]);
        assert!(state.turn().holds.is_empty());
        assert_eq!(state.player_by_name("Grace"), Some(PlayerId::new(1)));
        assert_eq!(state.player_by_name("Linus"), None);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_game_state_rejects_bad_names() {
        let result = GameState::new(names(&["Ada", "Ada"]), ScriptedDice::new([1]));
        assert!(matches!(result, Err(GameError::InvalidPlayers { .. })));
    }

    #[test]
    fn test_reset_keeps_die_source() {
        let source = ScriptedDice::new([1, 2, 3, 4, 5, 6]);
        let mut state = GameState::new(names(&["Ada", "Grace"]), source).unwrap();
        state.turn.phase = Phase::Scoring;

        state.reset(names(&["North", "South"])).unwrap();

        assert_eq!(state.rng().consumed(), 10);
        assert_eq!(state.turn().dice.values(), [6, 1, 2, 3, 4]);
        assert_eq!(state.phase(), Phase::Rolling);
        assert_eq!(state.player(PlayerId::new(0)).unwrap().name(), "North");
        assert_eq!(state.player_by_name("Ada"), None);
    }

    #[test]
    fn test_failed_reset_changes_nothing() {
        let mut state = GameState::new(names(&["Ada", "Grace"]), ScriptedDice::new([2])).unwrap();

        assert!(state.reset(Vec::new()).is_err());
        assert_eq!(state.player(PlayerId::new(1)).unwrap().name(), "Grace");
        assert_eq!(state.rng().consumed(), 5);
    }

    #[test]
    fn test_unknown_player() {
        let state = GameState::new(names(&["Ada", "Grace"]), ScriptedDice::new([2])).unwrap();
        assert_eq!(
            state.player(PlayerId::new(2)).unwrap_err(),
            GameError::UnknownPlayer {
                player: PlayerId::new(2),
            }
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(names(&["Ada", "Grace"]), ScriptedDice::new([3])).unwrap();
        let snapshot = state.snapshot(&ScoreTable::STANDARD);

        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[1].name, "Grace");
        assert_eq!(snapshot.players[0].available.len(), 13);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"rolling\""));
        let restored: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, restored);
    }
}
