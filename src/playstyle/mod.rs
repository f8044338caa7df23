//! Action-selection policies.
//!
//! A playstyle decides what the party at the front of a queue does next.
//! `None` is the "no valid action" sentinel (`'X'` in key codes).
//!
//! | Playstyle          | Source of the decision                     |
//! |--------------------|--------------------------------------------|
//! | `Manual`           | key input (`'A'` / `'S'`), unchecked       |
//! | `Random`           | uniform over legal actions, seeded         |
//! | `RecursiveMinimax` | exhaustive search, call-stack form         |
//! | `IterativeMinimax` | exhaustive search, explicit-stack form     |

use tracing::debug;

use crate::combat::Combatant;
use crate::core::{Action, GameRng, Result, SearchStrategy};
use crate::queue::TurnQueue;
use crate::search;

/// How a party picks its actions.
#[derive(Clone, Debug)]
pub enum Playstyle {
    /// Driven by key input.
    Manual,
    /// Uniformly random over the legal actions.
    Random(GameRng),
    /// Minimax with the recursive search.
    RecursiveMinimax,
    /// Minimax with the iterative search.
    IterativeMinimax,
}

impl Playstyle {
    /// A random playstyle seeded with `seed`.
    #[must_use]
    pub fn random(seed: u64) -> Self {
        Playstyle::Random(GameRng::new(seed))
    }

    /// A random playstyle on a fork of `rng`.
    #[must_use]
    pub fn random_from(rng: &mut GameRng) -> Self {
        Playstyle::Random(rng.fork())
    }

    /// The minimax playstyle for `strategy`.
    #[must_use]
    pub fn minimax(strategy: SearchStrategy) -> Self {
        match strategy {
            SearchStrategy::Recursive => Playstyle::RecursiveMinimax,
            SearchStrategy::Iterative => Playstyle::IterativeMinimax,
        }
    }

    /// Whether this playstyle needs key input.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        matches!(self, Playstyle::Manual)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Playstyle::Manual => "Manual",
            Playstyle::Random(_) => "Random",
            Playstyle::RecursiveMinimax => "Recursive Minimax",
            Playstyle::IterativeMinimax => "Iterative Minimax",
        }
    }

    /// Choose the action for the party at the front of `queue`.
    ///
    /// `input` is the key pressed for manual play and is ignored otherwise.
    /// Manual input is not checked for legality; executing an illegal
    /// action fails with `InvalidAction`.
    pub fn select_attack<C, Q>(&mut self, queue: &mut Q, input: Option<char>) -> Result<Option<Action>>
    where
        C: Combatant,
        Q: TurnQueue<C>,
    {
        let choice = match self {
            Playstyle::Manual => input.and_then(Action::from_code),
            Playstyle::Random(rng) => {
                let mover = queue.peek()?;
                let actions = queue.party(mover).available_actions();
                rng.choose(actions.as_slice()).copied()
            }
            Playstyle::RecursiveMinimax => search::best_action::<C, Q>(queue, SearchStrategy::Recursive)?,
            Playstyle::IterativeMinimax => search::best_action::<C, Q>(queue, SearchStrategy::Iterative)?,
        };
        debug!(playstyle = self.name(), choice = %crate::core::choice_code(choice), "selected");
        Ok(choice)
    }
}

impl std::fmt::Display for Playstyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
