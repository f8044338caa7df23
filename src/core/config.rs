//! Match and search configuration.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Which form of the game-tree search to run.
///
/// Both forms return identical scores for every state; they differ only in
/// whether depth is carried by the call stack or by an explicit frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Depth-first recursion.
    #[default]
    Recursive,
    /// Explicit-stack traversal over an arena of search nodes.
    Iterative,
}

/// Match runner configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Maximum turns `Duel::run` plays before stopping (0 = unlimited).
    pub max_turns: u32,

    /// Seed for random playstyles.
    /// Same seed produces the same match.
    pub seed: u64,

    /// Use a `RestrictedBattleQueue` instead of a plain `BattleQueue`.
    pub restricted: bool,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            max_turns: 1_000,
            seed: 42,
            restricted: false,
        }
    }
}

impl DuelConfig {
    /// Set the turn limit.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Choose the restricted queue.
    pub fn with_restricted(mut self, restricted: bool) -> Self {
        self.restricted = restricted;
        self
    }

    /// RNG seeded from this config, to fork random playstyles from.
    #[must_use]
    pub fn rng(&self) -> GameRng {
        GameRng::new(self.seed)
    }

    /// Check whether `turns` has reached the configured limit.
    #[must_use]
    pub fn turn_limit_reached(&self, turns: u32) -> bool {
        self.max_turns > 0 && turns >= self.max_turns
    }
}
