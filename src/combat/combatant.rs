//! The combatant capability contract.

use crate::core::{Action, ActionSet, PartyId, Result};
use crate::queue::TurnQueue;

/// What the queues and the search engine need from a combatant.
///
/// ## Implementation Notes
///
/// - `Clone` must produce a fully independent copy; queue copies clone the
///   roster and rely on this for branch isolation during search.
/// - `available_actions` must be a pure function of the combatant's own
///   resources. An empty set means the combatant's queue entries get pruned.
/// - `perform` must be deterministic, must reject actions outside
///   `available_actions` with `InvalidAction`, and may mutate either party
///   and add (or remove) queue entries.
/// - `Display` is used for queue rendering.
pub trait Combatant: Clone + std::fmt::Display {
    /// Actions this combatant can take right now, in canonical order.
    fn available_actions(&self) -> ActionSet;

    /// Current vitality.
    fn hp(&self) -> u32;

    /// Execute `action` for the combatant at `caster`.
    ///
    /// The target is always `caster.enemy()`.
    fn perform(queue: &mut dyn TurnQueue<Self>, caster: PartyId, action: Action) -> Result<()>;
}
