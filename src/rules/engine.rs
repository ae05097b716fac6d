//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What actions are legal
//! - How actions modify state
//! - When the game is over and who won

use crate::core::{GameError, PlayerId};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Every player tied.
    Draw,
    /// Several players share the top score but not all of them.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Resolve a result from final scores in seat order.
    ///
    /// Returns `None` for an empty slice.
    ///
    /// ```
    /// use yahtzee_engine::core::PlayerId;
    /// use yahtzee_engine::rules::GameResult;
    ///
    /// let result = GameResult::from_scores(&[180, 212]);
    /// assert_eq!(result, Some(GameResult::Winner(PlayerId::new(1))));
    /// assert_eq!(GameResult::from_scores(&[200, 200]), Some(GameResult::Draw));
    /// ```
    #[must_use]
    pub fn from_scores(scores: &[u32]) -> Option<Self> {
        let best = *scores.iter().max()?;
        let top: Vec<PlayerId> = PlayerId::all(scores.len())
            .zip(scores)
            .filter(|&(_, &s)| s == best)
            .map(|(p, _)| p)
            .collect();

        Some(match top.as_slice() {
            [single] => GameResult::Winner(*single),
            _ if top.len() == scores.len() => GameResult::Draw,
            _ => GameResult::Winners(top),
        })
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, GameResult::Draw)
    }
}

/// Rules engine trait, generic over the state type `S` it operates on.
///
/// ## Implementation Notes
///
/// - `legal_actions`: exactly the actions `apply_action` would accept
/// - `apply_action`: all-or-nothing; a rejected action leaves `state` untouched
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine<S> {
    /// A request to change the state.
    type Action;
    /// What an accepted action did.
    type Outcome;

    /// Enumerate all legal actions in `state`.
    fn legal_actions(&self, state: &S) -> Vec<Self::Action>;

    /// Apply an action to the game state.
    fn apply_action(
        &self,
        state: &mut S,
        action: &Self::Action,
    ) -> Result<Self::Outcome, GameError>;

    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &S) -> Option<GameResult>;

    /// Check an action against the legal set without applying it.
    fn is_legal(&self, state: &S, action: &Self::Action) -> bool
    where
        Self::Action: PartialEq,
    {
        self.legal_actions(state).contains(action)
    }
}
