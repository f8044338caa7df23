//! Core engine types: parties, actions, errors, RNG, configuration.
//!
//! These are the building blocks shared by the queues, the combatants, and
//! the search engine.

pub mod party;
pub mod action;
pub mod error;
pub mod rng;
pub mod config;

pub use party::{PartyId, PartyMap};
pub use action::{choice_code, Action, ActionSet};
pub use error::{BattleError, Result};
pub use rng::GameRng;
pub use config::{DuelConfig, SearchStrategy};
