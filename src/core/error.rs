//! Error taxonomy for queue, combat, and match operations.
//!
//! Every variant is caller-recoverable. A restricted queue rejecting an
//! ineligible insertion is not an error and never shows up here.

use thiserror::Error;

use super::action::Action;
use super::party::PartyId;

/// Errors raised by the battle engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BattleError {
    #[error("{party} cannot use action '{action}'")]
    InvalidAction { party: PartyId, action: Action },

    #[error("queue is empty after pruning")]
    EmptyQueue,

    #[error("queue has never had a party added")]
    Unseeded,

    #[error("{0} has no legal action")]
    NoLegalAction(PartyId),

    #[error("game already over")]
    GameOver,

    #[error("{0} is manually controlled and needs key input")]
    ManualInputRequired(PartyId),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BattleError>;
