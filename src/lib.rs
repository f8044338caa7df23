//! # rust-duel
//!
//! A two-party, turn-queue battle engine with exhaustive minimax search.
//!
//! ## Design Principles
//!
//! 1. **The queue is the game state**: who acts next is an ordered queue of
//!    party references that actions append to. Two parties share one queue
//!    and the queue owns both of them.
//!
//! 2. **Copies are replays**: `copy()` rebuilds a queue through its own
//!    insertion protocol, so derived bookkeeping (first actor, eligibility)
//!    comes out exactly as a fresh queue would compute it.
//!
//! 3. **Two searches, one answer**: the recursive and iterative search
//!    forms share the transition and scoring code and agree on every input.
//!
//! ## Architecture
//!
//! - **Persistent sequences**: queue order is an `im::Vector`, so the
//!   structural part of a copy is O(1).
//!
//! - **Arena search tree**: the iterative form keeps its nodes in a flat
//!   `Vec` indexed by `NodeId` and drops each node's state once resolved.
//!
//! - **Fixed two-slot roster**: parties are `PartyId::ONE` and
//!   `PartyId::TWO`; the enemy of a party is the other slot.
//!
//! ## Modules
//!
//! - `core`: party ids, actions, errors, RNG, configuration
//! - `queue`: `TurnQueue` trait, plain and restricted queues
//! - `combat`: `Combatant` contract, characters, skills, decision trees
//! - `search`: exhaustive adversarial search
//! - `playstyle`: action-selection policies
//! - `duel`: match runner

pub mod core;
pub mod queue;
pub mod combat;
pub mod search;
pub mod playstyle;
pub mod duel;

// Re-export commonly used types
pub use crate::core::{
    PartyId, PartyMap,
    Action, ActionSet, choice_code,
    BattleError, Result,
    GameRng,
    DuelConfig, SearchStrategy,
};

pub use crate::queue::{TurnQueue, BattleQueue, RestrictedBattleQueue, Eligibility};

pub use crate::combat::{
    Combatant, Character, CharacterClass, Skill,
    SkillDecisionTree, Condition, Subject, Stat, Comparison,
};

pub use crate::search::{
    best_action, state_score, score_action, successor, advance, terminal_score,
    SearchTree, SearchNode, NodeId, SearchStats,
};

pub use crate::playstyle::Playstyle;

pub use crate::duel::{Duel, DuelOutcome};
